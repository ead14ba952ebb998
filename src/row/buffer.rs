//! # RowBuffer - Owned Partial Rows
//!
//! This module provides `RowBuffer`, which owns a packed row buffer and its
//! cell table and remembers which columns have been explicitly set. It is the
//! usual way to build a key before handing a `RowView` to the successor
//! engine.
//!
//! ## Usage
//!
//! ```ignore
//! let mut row = RowBuffer::new(&schema);
//! row.set_int32(0, 1000)?;
//! row.set_string_no_copy(1, b"hello")?;
//! assert_eq!(row.to_string(), "int32 k1=1000, string k2=hello");
//!
//! // Reuse for the next key
//! row.reset();
//! ```
//!
//! ## Rendering
//!
//! `Display` lists only the columns that were set, in schema order, as
//! `<type> <name>=<value>` joined by `", "`. Unset columns are omitted; set
//! nullable columns holding NULL render as `NULL`.

use std::fmt;

use eyre::{ensure, Result};
use smallvec::{smallvec, SmallVec};

use crate::memory::Arena;
use crate::row::schema::Schema;
use crate::row::view::{write_column, RowRef, RowView};
use crate::types::{Cell, DataType};

macro_rules! tracked_setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        ::paste::paste! {
            $(
                pub fn [<set_ $name>](&mut self, col_idx: usize, value: $ty) -> Result<()> {
                    self.view_mut().[<set_ $name>](col_idx, value)?;
                    self.mark_set(col_idx);
                    Ok(())
                }
            )*
        }
    };
}

pub struct RowBuffer<'s, 'a> {
    schema: &'s Schema,
    data: Vec<u8>,
    cells: SmallVec<[&'a [u8]; 4]>,
    isset: Vec<u8>,
}

impl fmt::Debug for RowBuffer<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowBuffer")
            .field("row_size", &self.data.len())
            .field("cells", &self.cells.len())
            .finish()
    }
}

impl<'s, 'a> RowBuffer<'s, 'a> {
    pub fn new(schema: &'s Schema) -> Self {
        let mut row = Self {
            schema,
            data: vec![0u8; schema.row_size()],
            cells: smallvec![&[][..]; schema.var_column_count()],
            isset: vec![0u8; Schema::null_bitmap_size(schema.column_count())],
        };
        row.view_mut().clear();
        row
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn reset(&mut self) {
        self.view_mut().clear();
        self.isset.fill(0);
    }

    pub fn view_mut(&mut self) -> RowView<'_, 'a> {
        RowView::new(self.schema, &mut self.data, &mut self.cells)
    }

    pub fn row_ref(&self) -> RowRef<'_, 'a> {
        RowRef::new(self.schema, &self.data, &self.cells)
    }

    pub fn is_set(&self, col_idx: usize) -> bool {
        let byte_idx = col_idx / 8;
        let bit_idx = col_idx % 8;
        self.isset
            .get(byte_idx)
            .is_some_and(|b| (b & (1 << bit_idx)) != 0)
    }

    /// True once every key column has been set.
    pub fn is_key_set(&self) -> bool {
        (0..self.schema.key_column_count()).all(|idx| self.is_set(idx))
    }

    fn mark_set(&mut self, col_idx: usize) {
        let byte_idx = col_idx / 8;
        let bit_idx = col_idx % 8;
        self.isset[byte_idx] |= 1 << bit_idx;
    }

    tracked_setters! {
        int8: i8,
        int16: i16,
        int32: i32,
        int64: i64,
        uint8: u8,
        uint16: u16,
        uint32: u32,
        uint64: u64,
        bool: bool,
        float: f32,
        double: f64,
    }

    pub fn set_null(&mut self, col_idx: usize) -> Result<()> {
        self.view_mut().set_null(col_idx)?;
        self.mark_set(col_idx);
        Ok(())
    }

    pub fn set_cell(&mut self, col_idx: usize, cell: Cell<'a>) -> Result<()> {
        self.view_mut().set_cell(col_idx, cell)?;
        self.mark_set(col_idx);
        Ok(())
    }

    /// Points a String column at caller-owned bytes without copying.
    pub fn set_string_no_copy(&mut self, col_idx: usize, value: &'a [u8]) -> Result<()> {
        self.set_var_checked(col_idx, DataType::String, value)
    }

    /// Points a Binary column at caller-owned bytes without copying.
    pub fn set_binary_no_copy(&mut self, col_idx: usize, value: &'a [u8]) -> Result<()> {
        self.set_var_checked(col_idx, DataType::Binary, value)
    }

    /// Copies `value` into `arena` and points a String column at the copy.
    pub fn set_string_copy(&mut self, col_idx: usize, value: &[u8], arena: &'a Arena) -> Result<()> {
        let copy = arena.copy_bytes(value)?;
        self.set_var_checked(col_idx, DataType::String, copy)
    }

    /// Copies `value` into `arena` and points a Binary column at the copy.
    pub fn set_binary_copy(&mut self, col_idx: usize, value: &[u8], arena: &'a Arena) -> Result<()> {
        let copy = arena.copy_bytes(value)?;
        self.set_var_checked(col_idx, DataType::Binary, copy)
    }

    fn set_var_checked(&mut self, col_idx: usize, expected: DataType, value: &'a [u8]) -> Result<()> {
        let col = self.schema.column(col_idx).ok_or_else(|| {
            eyre::eyre!(
                "column index {} out of bounds (count={})",
                col_idx,
                self.schema.column_count()
            )
        })?;
        ensure!(
            col.data_type() == expected,
            "column {} has type {}, not {}",
            col_idx,
            col.data_type(),
            expected
        );
        self.view_mut().set_bytes(col_idx, value)?;
        self.mark_set(col_idx);
        Ok(())
    }
}

impl fmt::Display for RowBuffer<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = self.row_ref();
        let mut first = true;
        for (idx, column) in self.schema.columns().iter().enumerate() {
            if !self.is_set(idx) {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            let cell = row.cell_opt(idx).map_err(|_| fmt::Error)?;
            write_column(f, column, cell)?;
        }
        Ok(())
    }
}
