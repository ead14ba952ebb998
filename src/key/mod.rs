//! # Primary Key Operations
//!
//! Successor computation and ordering for composite primary keys. A primary
//! key is the first `key_column_count` columns of a row; keys order
//! lexicographically by column, integers by value and byte strings
//! byte-wise.
//!
//! ## Successor Semantics
//!
//! The successor of a key is the smallest key strictly greater than it:
//!
//! | Key | Successor |
//! |-----|-----------|
//! | `(1000, 1000)` | `(1000, 1001)` |
//! | `(1000, i32::MAX)` | `(1001, i32::MIN)` |
//! | `(1000, "hello")` | `(1000, "hello\0")` |
//! | `(i32::MAX, i32::MAX)` | none, row left at `(i32::MIN, i32::MIN)` |
//!
//! Only the successor of a byte string needs memory; it comes from the
//! `Arena` passed in and must outlive the row.
//!
//! ## Module Organization
//!
//! - `increment`: `increment_cell` and `increment_primary_key`
//! - `compare`: `compare_cells`, `compare_keys` and `are_consecutive`

mod compare;
mod increment;

pub use compare::{are_consecutive, compare_cells, compare_keys};
pub use increment::{increment_cell, increment_primary_key};
