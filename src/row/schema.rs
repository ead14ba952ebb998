//! # Schema Definition
//!
//! This module provides the `Schema` struct that defines the layout of a
//! packed row. The schema pre-computes slot offsets for O(1) column access
//! and records how many leading columns form the primary key.
//!
//! ## Schema Internals
//!
//! - `columns`: Ordered column definitions (order defines layout and key order)
//! - `key_column_count`: Number of leading columns in the primary key
//! - `slot_offsets`: Absolute byte offset of each column's slot in the row
//! - `var_ordinals`: Position of each variable column in the cell table
//! - `row_size`: Null bitmap plus all slots

use eyre::{ensure, Result};

use crate::types::ColumnDef;

#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<ColumnDef>,
    key_column_count: usize,
    slot_offsets: Vec<usize>,
    var_ordinals: Vec<Option<usize>>,
    var_column_count: usize,
    row_size: usize,
}

impl Schema {
    pub fn new(columns: Vec<ColumnDef>, key_column_count: usize) -> Result<Self> {
        ensure!(
            key_column_count >= 1,
            "schema must declare at least one key column"
        );
        ensure!(
            key_column_count <= columns.len(),
            "key column count {} exceeds column count {}",
            key_column_count,
            columns.len()
        );
        for (idx, col) in columns.iter().take(key_column_count).enumerate() {
            ensure!(
                !col.is_nullable(),
                "key column {} ({}) cannot be nullable",
                idx,
                col.name()
            );
        }

        let mut slot_offsets = Vec::with_capacity(columns.len());
        let mut var_ordinals = Vec::with_capacity(columns.len());
        let mut var_column_count = 0;
        let mut offset = Self::null_bitmap_size(columns.len());

        for col in &columns {
            slot_offsets.push(offset);
            offset += col.data_type().slot_size();
            if col.data_type().is_variable() {
                var_ordinals.push(Some(var_column_count));
                var_column_count += 1;
            } else {
                var_ordinals.push(None);
            }
        }

        Ok(Self {
            columns,
            key_column_count,
            slot_offsets,
            var_ordinals,
            var_column_count,
            row_size: offset,
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn key_column_count(&self) -> usize {
        self.key_column_count
    }

    pub fn var_column_count(&self) -> usize {
        self.var_column_count
    }

    pub fn column(&self, idx: usize) -> Option<&ColumnDef> {
        self.columns.get(idx)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn key_columns(&self) -> &[ColumnDef] {
        &self.columns[..self.key_column_count]
    }

    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    pub fn is_key_column(&self, idx: usize) -> bool {
        idx < self.key_column_count
    }

    /// Absolute byte offset of a column's slot within the row buffer.
    pub fn slot_offset(&self, col_idx: usize) -> usize {
        self.slot_offsets[col_idx]
    }

    /// Index into the cell table, or None for fixed-width columns.
    pub fn var_ordinal(&self, col_idx: usize) -> Option<usize> {
        self.var_ordinals.get(col_idx).copied().flatten()
    }

    /// Total bytes a row buffer must provide for this schema.
    pub fn row_size(&self) -> usize {
        self.row_size
    }

    pub fn null_bitmap_size(column_count: usize) -> usize {
        column_count.div_ceil(8)
    }
}
