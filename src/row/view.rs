//! # Row Views - Typed Access to Packed Rows
//!
//! This module provides `RowRef` for reading and `RowView` for mutating a
//! packed row buffer interpreted through a `Schema`.
//!
//! ## Row Binary Layout
//!
//! ```text
//! +------------------+------------------+------------------+-----+
//! | Null Bitmap      | Slot 0           | Slot 1           | ... |
//! | [u8; (N+7)/8]    | inline or VarSlot| inline or VarSlot|     |
//! +------------------+------------------+------------------+-----+
//! ```
//!
//! Fixed-width columns store their little-endian value inline. Variable
//! columns store a `VarSlot` (cell ordinal + length) that references the
//! row's cell table, a slice of borrowed `&'a [u8]`. Replacing a variable
//! cell only repoints the table entry; the previous bytes are untouched.
//!
//! ## Usage
//!
//! ```ignore
//! let mut view = RowView::new(&schema, &mut data, &mut cells);
//! view.set_int32(0, 1000)?;
//! view.set_bytes(1, b"hello")?;
//! assert_eq!(view.get_int32(0)?, 1000);
//! ```
//!
//! ## Preconditions
//!
//! Constructing a view over a buffer smaller than `schema.row_size()`, or a
//! cell table shorter than the schema's variable column count, panics.

use std::fmt;

use eyre::{ensure, Result};
use zerocopy::{FromBytes, IntoBytes};

use crate::config::{MAX_CELL_LEN, VAR_SLOT_SIZE};
use crate::row::schema::Schema;
use crate::row::slot::VarSlot;
use crate::types::{Cell, ColumnDef, DataType};

fn assert_row_fits(schema: &Schema, data_len: usize, cell_count: usize) {
    assert!(
        data_len >= schema.row_size(),
        "row buffer of {} bytes is smaller than schema row size {}",
        data_len,
        schema.row_size()
    );
    assert!(
        cell_count >= schema.var_column_count(),
        "cell table of {} entries is smaller than {} variable columns",
        cell_count,
        schema.var_column_count()
    );
}

fn column_def(schema: &Schema, col_idx: usize) -> Result<&ColumnDef> {
    schema.column(col_idx).ok_or_else(|| {
        eyre::eyre!(
            "column index {} out of bounds (count={})",
            col_idx,
            schema.column_count()
        )
    })
}

pub(crate) fn write_column(
    f: &mut fmt::Formatter<'_>,
    column: &ColumnDef,
    cell: Option<Cell<'_>>,
) -> fmt::Result {
    write!(f, "{} {}=", column.data_type(), column.name())?;
    match cell {
        Some(cell) => write!(f, "{}", cell),
        None => f.write_str("NULL"),
    }
}

macro_rules! fixed_getters {
    ($($name:ident: $ty:ty => $variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                pub fn [<get_ $name>](&self, col_idx: usize) -> Result<$ty> {
                    let bytes = self.fixed_slot(col_idx, DataType::$variant)?;
                    let raw: [u8; std::mem::size_of::<$ty>()] = bytes.try_into().map_err(|_| {
                        eyre::eyre!("insufficient data for {} at col {}", stringify!($name), col_idx)
                    })?;
                    Ok(<$ty>::from_le_bytes(raw))
                }
            )*
        }
    };
}

macro_rules! fixed_setters {
    ($($name:ident: $ty:ty => $variant:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                pub fn [<get_ $name>](&self, col_idx: usize) -> Result<$ty> {
                    self.reader().[<get_ $name>](col_idx)
                }

                pub fn [<set_ $name>](&mut self, col_idx: usize, value: $ty) -> Result<()> {
                    let slot = self.fixed_slot_mut(col_idx, DataType::$variant)?;
                    slot.copy_from_slice(&value.to_le_bytes());
                    self.clear_null(col_idx);
                    Ok(())
                }
            )*
        }
    };
}

/// Read-only view of a packed row.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'r, 'a> {
    schema: &'r Schema,
    data: &'r [u8],
    cells: &'r [&'a [u8]],
}

impl<'r, 'a> RowRef<'r, 'a> {
    pub fn new(schema: &'r Schema, data: &'r [u8], cells: &'r [&'a [u8]]) -> Self {
        assert_row_fits(schema, data.len(), cells.len());
        Self {
            schema,
            data,
            cells,
        }
    }

    pub fn schema(&self) -> &'r Schema {
        self.schema
    }

    pub fn data(&self) -> &'r [u8] {
        self.data
    }

    pub fn is_null(&self, col_idx: usize) -> bool {
        let byte_idx = col_idx / 8;
        let bit_idx = col_idx % 8;
        (self.data[byte_idx] & (1 << bit_idx)) != 0
    }

    fn fixed_slot(&self, col_idx: usize, expected: DataType) -> Result<&'r [u8]> {
        let col = column_def(self.schema, col_idx)?;
        ensure!(
            col.data_type() == expected,
            "column {} has type {}, not {}",
            col_idx,
            col.data_type(),
            expected
        );
        let offset = self.schema.slot_offset(col_idx);
        Ok(&self.data[offset..offset + expected.slot_size()])
    }

    fixed_getters! {
        int8: i8 => Int8,
        int16: i16 => Int16,
        int32: i32 => Int32,
        int64: i64 => Int64,
        uint8: u8 => UInt8,
        uint16: u16 => UInt16,
        uint32: u32 => UInt32,
        uint64: u64 => UInt64,
        float: f32 => Float,
        double: f64 => Double,
    }

    pub fn get_bool(&self, col_idx: usize) -> Result<bool> {
        let bytes = self.fixed_slot(col_idx, DataType::Bool)?;
        Ok(bytes[0] != 0)
    }

    /// Follows the indirect slot of a String or Binary column.
    pub fn get_bytes(&self, col_idx: usize) -> Result<&'a [u8]> {
        let col = column_def(self.schema, col_idx)?;
        ensure!(
            col.data_type().is_variable(),
            "column {} has type {}, not a variable column",
            col_idx,
            col.data_type()
        );
        let ordinal = self
            .schema
            .var_ordinal(col_idx)
            .ok_or_else(|| eyre::eyre!("column {} has no cell ordinal", col_idx))?;

        let offset = self.schema.slot_offset(col_idx);
        let slot = VarSlot::ref_from_bytes(&self.data[offset..offset + VAR_SLOT_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse indirect slot at col {}: {:?}", col_idx, e))?;

        ensure!(
            slot.ordinal() as usize == ordinal,
            "indirect slot at col {} references cell {}, expected {}",
            col_idx,
            slot.ordinal(),
            ordinal
        );
        let cell = self.cells[ordinal];
        ensure!(
            cell.len() == slot.len() as usize,
            "indirect slot at col {} records {} bytes but cell holds {}",
            col_idx,
            slot.len(),
            cell.len()
        );
        Ok(cell)
    }

    /// Reads a column as a typed cell, ignoring the null bit.
    pub fn cell(&self, col_idx: usize) -> Result<Cell<'a>> {
        let col = column_def(self.schema, col_idx)?;
        Ok(match col.data_type() {
            DataType::Int8 => Cell::Int8(self.get_int8(col_idx)?),
            DataType::Int16 => Cell::Int16(self.get_int16(col_idx)?),
            DataType::Int32 => Cell::Int32(self.get_int32(col_idx)?),
            DataType::Int64 => Cell::Int64(self.get_int64(col_idx)?),
            DataType::UInt8 => Cell::UInt8(self.get_uint8(col_idx)?),
            DataType::UInt16 => Cell::UInt16(self.get_uint16(col_idx)?),
            DataType::UInt32 => Cell::UInt32(self.get_uint32(col_idx)?),
            DataType::UInt64 => Cell::UInt64(self.get_uint64(col_idx)?),
            DataType::Bool => Cell::Bool(self.get_bool(col_idx)?),
            DataType::Float => Cell::Float(self.get_float(col_idx)?),
            DataType::Double => Cell::Double(self.get_double(col_idx)?),
            DataType::String => Cell::String(self.get_bytes(col_idx)?),
            DataType::Binary => Cell::Binary(self.get_bytes(col_idx)?),
        })
    }

    pub fn cell_opt(&self, col_idx: usize) -> Result<Option<Cell<'a>>> {
        if self.is_null(col_idx) {
            return Ok(None);
        }
        self.cell(col_idx).map(Some)
    }
}

impl fmt::Display for RowRef<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, column) in self.schema.columns().iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            let cell = self.cell_opt(idx).map_err(|_| fmt::Error)?;
            write_column(f, column, cell)?;
        }
        f.write_str(")")
    }
}

/// Mutable view of a packed row. Writes go straight through to the buffer.
#[derive(Debug)]
pub struct RowView<'r, 'a> {
    schema: &'r Schema,
    data: &'r mut [u8],
    cells: &'r mut [&'a [u8]],
}

impl<'r, 'a> RowView<'r, 'a> {
    pub fn new(schema: &'r Schema, data: &'r mut [u8], cells: &'r mut [&'a [u8]]) -> Self {
        assert_row_fits(schema, data.len(), cells.len());
        Self {
            schema,
            data,
            cells,
        }
    }

    pub fn schema(&self) -> &'r Schema {
        self.schema
    }

    pub fn reader(&self) -> RowRef<'_, 'a> {
        RowRef {
            schema: self.schema,
            data: &*self.data,
            cells: &*self.cells,
        }
    }

    /// Resets every column: fixed slots to zero, variable slots to an empty
    /// cell, nullable columns to NULL.
    pub fn clear(&mut self) {
        let row_size = self.schema.row_size();
        self.data[..row_size].fill(0);
        for cell in self.cells.iter_mut() {
            *cell = &[];
        }
        for (idx, col) in self.schema.columns().iter().enumerate() {
            if col.is_nullable() {
                self.set_null_bit(idx);
            }
            if let Some(ordinal) = self.schema.var_ordinal(idx) {
                let offset = self.schema.slot_offset(idx);
                let slot = VarSlot::new(ordinal as u32, 0);
                self.data[offset..offset + VAR_SLOT_SIZE].copy_from_slice(slot.as_bytes());
            }
        }
    }

    pub fn is_null(&self, col_idx: usize) -> bool {
        self.reader().is_null(col_idx)
    }

    pub fn set_null(&mut self, col_idx: usize) -> Result<()> {
        let col = column_def(self.schema, col_idx)?;
        ensure!(
            col.is_nullable(),
            "column {} ({}) is not nullable",
            col_idx,
            col.name()
        );
        self.set_null_bit(col_idx);
        Ok(())
    }

    fn set_null_bit(&mut self, col_idx: usize) {
        let byte_idx = col_idx / 8;
        let bit_idx = col_idx % 8;
        self.data[byte_idx] |= 1 << bit_idx;
    }

    fn clear_null(&mut self, col_idx: usize) {
        let byte_idx = col_idx / 8;
        let bit_idx = col_idx % 8;
        self.data[byte_idx] &= !(1 << bit_idx);
    }

    fn fixed_slot_mut(&mut self, col_idx: usize, expected: DataType) -> Result<&mut [u8]> {
        let col = column_def(self.schema, col_idx)?;
        ensure!(
            col.data_type() == expected,
            "column {} has type {}, not {}",
            col_idx,
            col.data_type(),
            expected
        );
        let offset = self.schema.slot_offset(col_idx);
        Ok(&mut self.data[offset..offset + expected.slot_size()])
    }

    fixed_setters! {
        int8: i8 => Int8,
        int16: i16 => Int16,
        int32: i32 => Int32,
        int64: i64 => Int64,
        uint8: u8 => UInt8,
        uint16: u16 => UInt16,
        uint32: u32 => UInt32,
        uint64: u64 => UInt64,
        float: f32 => Float,
        double: f64 => Double,
    }

    pub fn get_bool(&self, col_idx: usize) -> Result<bool> {
        self.reader().get_bool(col_idx)
    }

    pub fn set_bool(&mut self, col_idx: usize, value: bool) -> Result<()> {
        let slot = self.fixed_slot_mut(col_idx, DataType::Bool)?;
        slot[0] = u8::from(value);
        self.clear_null(col_idx);
        Ok(())
    }

    pub fn get_bytes(&self, col_idx: usize) -> Result<&'a [u8]> {
        self.reader().get_bytes(col_idx)
    }

    /// Repoints a String or Binary column at `value`.
    pub fn set_bytes(&mut self, col_idx: usize, value: &'a [u8]) -> Result<()> {
        let col = column_def(self.schema, col_idx)?;
        ensure!(
            col.data_type().is_variable(),
            "column {} has type {}, not a variable column",
            col_idx,
            col.data_type()
        );
        ensure!(
            value.len() <= MAX_CELL_LEN,
            "value of {} bytes exceeds maximum cell length {} for col {}",
            value.len(),
            MAX_CELL_LEN,
            col_idx
        );
        let ordinal = self
            .schema
            .var_ordinal(col_idx)
            .ok_or_else(|| eyre::eyre!("column {} has no cell ordinal", col_idx))?;

        let offset = self.schema.slot_offset(col_idx);
        let slot = VarSlot::mut_from_bytes(&mut self.data[offset..offset + VAR_SLOT_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse indirect slot at col {}: {:?}", col_idx, e))?;
        slot.set_ordinal(ordinal as u32);
        slot.set_len(value.len() as u32);

        self.cells[ordinal] = value;
        self.clear_null(col_idx);
        Ok(())
    }

    pub fn cell(&self, col_idx: usize) -> Result<Cell<'a>> {
        self.reader().cell(col_idx)
    }

    pub fn cell_opt(&self, col_idx: usize) -> Result<Option<Cell<'a>>> {
        self.reader().cell_opt(col_idx)
    }

    pub fn set_cell(&mut self, col_idx: usize, cell: Cell<'a>) -> Result<()> {
        let col = column_def(self.schema, col_idx)?;
        ensure!(
            col.data_type() == cell.data_type(),
            "cannot store {} value in column {} of type {}",
            cell.data_type(),
            col_idx,
            col.data_type()
        );
        match cell {
            Cell::Int8(v) => self.set_int8(col_idx, v),
            Cell::Int16(v) => self.set_int16(col_idx, v),
            Cell::Int32(v) => self.set_int32(col_idx, v),
            Cell::Int64(v) => self.set_int64(col_idx, v),
            Cell::UInt8(v) => self.set_uint8(col_idx, v),
            Cell::UInt16(v) => self.set_uint16(col_idx, v),
            Cell::UInt32(v) => self.set_uint32(col_idx, v),
            Cell::UInt64(v) => self.set_uint64(col_idx, v),
            Cell::Bool(v) => self.set_bool(col_idx, v),
            Cell::Float(v) => self.set_float(col_idx, v),
            Cell::Double(v) => self.set_double(col_idx, v),
            Cell::String(bytes) | Cell::Binary(bytes) => self.set_bytes(col_idx, bytes),
        }
    }
}
