//! Composite key ordering.
//!
//! Keys compare column by column, left to right. Integers compare by value in
//! their declared signedness, strings and binaries byte-lexicographically, so
//! a string is ordered before every string it prefixes. This is the order
//! `increment_primary_key` steps through.

use std::cmp::Ordering;

use eyre::{bail, ensure, Result};

use crate::row::RowRef;
use crate::types::Cell;

/// Orders two cells of the same type.
pub fn compare_cells(a: &Cell<'_>, b: &Cell<'_>) -> Result<Ordering> {
    let ordering = match (a, b) {
        (Cell::Int8(x), Cell::Int8(y)) => x.cmp(y),
        (Cell::Int16(x), Cell::Int16(y)) => x.cmp(y),
        (Cell::Int32(x), Cell::Int32(y)) => x.cmp(y),
        (Cell::Int64(x), Cell::Int64(y)) => x.cmp(y),
        (Cell::UInt8(x), Cell::UInt8(y)) => x.cmp(y),
        (Cell::UInt16(x), Cell::UInt16(y)) => x.cmp(y),
        (Cell::UInt32(x), Cell::UInt32(y)) => x.cmp(y),
        (Cell::UInt64(x), Cell::UInt64(y)) => x.cmp(y),
        (Cell::Bool(x), Cell::Bool(y)) => x.cmp(y),
        (Cell::Float(x), Cell::Float(y)) => x.total_cmp(y),
        (Cell::Double(x), Cell::Double(y)) => x.total_cmp(y),
        (Cell::String(x), Cell::String(y)) | (Cell::Binary(x), Cell::Binary(y)) => x.cmp(y),
        _ => bail!(
            "cannot compare {} cell with {} cell",
            a.data_type(),
            b.data_type()
        ),
    };
    Ok(ordering)
}

/// Lexicographic comparison of the first `key_column_count` columns.
///
/// Both rows must share column types for the key prefix. Null key columns
/// are rejected.
pub fn compare_keys(a: &RowRef<'_, '_>, b: &RowRef<'_, '_>, key_column_count: usize) -> Result<Ordering> {
    ensure!(
        key_column_count <= a.schema().column_count() && key_column_count <= b.schema().column_count(),
        "key column count {} exceeds row column count",
        key_column_count
    );

    for idx in 0..key_column_count {
        ensure!(
            !a.is_null(idx) && !b.is_null(idx),
            "key column {} is null",
            idx
        );
        match compare_cells(&a.cell(idx)?, &b.cell(idx)?)? {
            Ordering::Equal => continue,
            other => return Ok(other),
        }
    }
    Ok(Ordering::Equal)
}

/// True when `b` is the immediate successor of `a` in its own type.
///
/// Integers: `a + 1 == b` without wraparound. Strings and binaries: `b` is
/// `a` followed by a single zero byte. Always false for mismatched or
/// non-incrementable types.
pub fn are_consecutive(a: &Cell<'_>, b: &Cell<'_>) -> bool {
    match (a, b) {
        (Cell::Int8(x), Cell::Int8(y)) => x.checked_add(1) == Some(*y),
        (Cell::Int16(x), Cell::Int16(y)) => x.checked_add(1) == Some(*y),
        (Cell::Int32(x), Cell::Int32(y)) => x.checked_add(1) == Some(*y),
        (Cell::Int64(x), Cell::Int64(y)) => x.checked_add(1) == Some(*y),
        (Cell::UInt8(x), Cell::UInt8(y)) => x.checked_add(1) == Some(*y),
        (Cell::UInt16(x), Cell::UInt16(y)) => x.checked_add(1) == Some(*y),
        (Cell::UInt32(x), Cell::UInt32(y)) => x.checked_add(1) == Some(*y),
        (Cell::UInt64(x), Cell::UInt64(y)) => x.checked_add(1) == Some(*y),
        (Cell::String(x), Cell::String(y)) | (Cell::Binary(x), Cell::Binary(y)) => {
            y.len() == x.len() + 1 && y.starts_with(x) && y[x.len()] == 0
        }
        _ => false,
    }
}
