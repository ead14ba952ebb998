//! # Packed Rows with O(1) Column Access
//!
//! This module provides the schema-driven row layer the key successor engine
//! operates on. A row is a byte buffer with one fixed-size slot per column;
//! the schema pre-computes every slot offset so column access never scans.
//!
//! ## Row Binary Layout
//!
//! ```text
//! +------------------+------------------+------------------+-----+
//! | Null Bitmap      | Slot 0           | Slot 1           | ... |
//! | [u8; (N+7)/8]    | [u8; width(0)]   | [u8; width(1)]   |     |
//! +------------------+------------------+------------------+-----+
//! ```
//!
//! | Component | Description |
//! |-----------|-------------|
//! | **Null Bitmap** | 1 bit per column. `1` = NULL, `0` = has data |
//! | **Fixed slot** | Little-endian value, width of the column type |
//! | **Variable slot** | 8 byte `VarSlot`: cell ordinal + byte length |
//!
//! ## Storage Classes
//!
//! | Class | Examples | Storage |
//! |-------|----------|---------|
//! | **Fixed** | int8..int64, uint8..uint64, bool, float, double | Inline in slot |
//! | **Variable** | string, binary | Slot references a borrowed cell |
//!
//! ## Module Structure
//!
//! - `schema`: Column list, key column count and pre-computed offsets
//! - `slot`: zerocopy layout of the indirect slot
//! - `view`: `RowRef` (read) and `RowView` (write-through) views
//! - `buffer`: `RowBuffer`, an owned row that tracks which columns were set

pub mod buffer;
pub mod schema;
pub mod slot;
pub mod view;

#[cfg(test)]
mod tests;

pub use buffer::RowBuffer;
pub use schema::Schema;
pub use slot::VarSlot;
pub use view::{RowRef, RowView};
