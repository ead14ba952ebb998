//! # Primary Key Successor
//!
//! Computes the lexicographically-next composite key of a row in place.
//!
//! ## Algorithm
//!
//! Key columns are visited right to left, like incrementing a positional
//! numeral:
//!
//! ```text
//!   k1=1000   k2=i32::MAX          k1=1000   k2=i32::MIN     k1=1001   k2=i32::MIN
//!             ^ overflow     =>    ^ carry                   (absorbed, Ok(true))
//! ```
//!
//! - **Integer column**: `value + 1` in the column's own width. At the
//!   maximum the column wraps to its minimum and the carry moves one column
//!   left.
//! - **String/Binary column**: a zero byte is appended. The grown cell is
//!   allocated from the arena; the old bytes are left alone. Strings have no
//!   maximum, so a string column absorbs any carry.
//!
//! If the carry runs off the first key column, every key column has wrapped
//! to its minimum and the key space is exhausted (`Ok(false)`).
//!
//! ## Errors
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | Key space exhausted | `Ok(false)` |
//! | Arena cannot grow | `Err` carrying `ArenaError` |
//! | Bool/Float/Double key column | `Err`, row untouched |
//! | Null key column, non-key column in key | panic (caller bug) |

use eyre::{ensure, Result};
use tracing::{debug, trace};

use crate::memory::Arena;
use crate::row::RowView;
use crate::types::Cell;

/// Integer widths with an exact successor in their own bit width.
trait FixedKey: Copy {
    const MIN: Self;

    fn successor(self) -> Option<Self>;
}

macro_rules! impl_fixed_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedKey for $ty {
                const MIN: Self = <$ty>::MIN;

                #[inline]
                fn successor(self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

impl_fixed_key!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Returns false and wraps to the minimum when `value` is the maximum.
#[inline]
fn step<T: FixedKey>(value: &mut T) -> bool {
    match value.successor() {
        Some(next) => {
            *value = next;
            true
        }
        None => {
            *value = T::MIN;
            false
        }
    }
}

/// Copies `bytes` into a fresh arena buffer one byte longer, ending in `\0`.
fn append_zero<'a>(bytes: &[u8], arena: &'a Arena) -> Result<&'a [u8]> {
    let grown = arena.allocate(bytes.len() + 1)?;
    grown[..bytes.len()].copy_from_slice(bytes);
    grown[bytes.len()] = 0;
    Ok(grown)
}

/// Replaces `cell` with its successor.
///
/// Returns `Ok(false)` when an integer cell overflowed and wrapped to its
/// minimum. String and binary cells always succeed unless the arena fails.
pub fn increment_cell<'a>(cell: &mut Cell<'a>, arena: &'a Arena) -> Result<bool> {
    let data_type = cell.data_type();
    match cell {
        Cell::Int8(v) => Ok(step(v)),
        Cell::Int16(v) => Ok(step(v)),
        Cell::Int32(v) => Ok(step(v)),
        Cell::Int64(v) => Ok(step(v)),
        Cell::UInt8(v) => Ok(step(v)),
        Cell::UInt16(v) => Ok(step(v)),
        Cell::UInt32(v) => Ok(step(v)),
        Cell::UInt64(v) => Ok(step(v)),
        Cell::String(bytes) | Cell::Binary(bytes) => {
            *bytes = append_zero(bytes, arena)?;
            Ok(true)
        }
        Cell::Bool(_) | Cell::Float(_) | Cell::Double(_) => {
            eyre::bail!("cannot compute successor of {} key cell", data_type)
        }
    }
}

/// Advances the first `key_column_count` columns of `row` to the smallest
/// composite key strictly greater than the current one.
///
/// Returns `Ok(false)` when no such key exists; every key column then holds
/// its type's minimum. Cells grown by this call borrow from `arena`, which
/// therefore has to outlive the row.
///
/// # Panics
///
/// Panics if `key_column_count` is zero, if it reaches past the schema's key
/// columns into value columns, or if a key column is null.
pub fn increment_primary_key<'a>(
    row: &mut RowView<'_, 'a>,
    key_column_count: usize,
    arena: &'a Arena,
) -> Result<bool> {
    let schema = row.schema();
    assert!(
        key_column_count >= 1 && key_column_count <= schema.column_count(),
        "key column count {} out of range 1..={}",
        key_column_count,
        schema.column_count()
    );
    assert!(
        key_column_count <= schema.key_column_count(),
        "key column count {} exceeds schema key column count {}",
        key_column_count,
        schema.key_column_count()
    );

    for (idx, col) in schema.columns()[..key_column_count].iter().enumerate() {
        assert!(!row.is_null(idx), "key column {} ({}) is null", idx, col.name());
        ensure!(
            col.data_type().is_incrementable(),
            "key column {} ({}) has type {} which has no successor",
            idx,
            col.name(),
            col.data_type()
        );
    }

    for idx in (0..key_column_count).rev() {
        let mut cell = row.cell(idx)?;
        let absorbed = increment_cell(&mut cell, arena)?;
        row.set_cell(idx, cell)?;
        if absorbed {
            return Ok(true);
        }
        trace!(column = idx, "key column wrapped to minimum, carrying left");
    }

    debug!(key_column_count, "primary key space exhausted");
    Ok(false)
}
