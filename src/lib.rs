//! # rowkey - Composite Primary Key Successors
//!
//! rowkey computes, in place, the smallest composite primary key strictly
//! greater than a given one. Range scans use it to turn inclusive bounds into
//! exclusive ones (`k <= x` becomes `k < succ(x)`) and to resume a scan just
//! past the last key seen.
//!
//! - **In-place**: the key is rewritten inside the caller's packed row
//! - **Arena-backed growth**: only string successors allocate, from a
//!   caller-supplied `Arena` whose lifetime the row borrows
//! - **No hidden state**: every call is independent and deterministic
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowkey::{increment_primary_key, Arena, ColumnDef, DataType, RowBuffer, Schema};
//!
//! let schema = Schema::new(
//!     vec![
//!         ColumnDef::new("k1", DataType::Int32),
//!         ColumnDef::new("k2", DataType::String),
//!     ],
//!     2,
//! )?;
//! let arena = Arena::new();
//! let mut row = RowBuffer::new(&schema);
//! row.set_int32(0, 1000)?;
//! row.set_string_no_copy(1, b"hello")?;
//!
//! assert!(increment_primary_key(&mut row.view_mut(), 2, &arena)?);
//! assert_eq!(row.to_string(), "int32 k1=1000, string k2=hello\\000");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  predicate: range bound conversion   │
//! ├─────────────────────────────────────┤
//! │  key: successor, compare, adjacency  │
//! ├───────────────────┬─────────────────┤
//! │  row: schema and  │  memory: arena   │
//! │  packed row views │  for grown cells │
//! ├───────────────────┴─────────────────┤
//! │      types: DataType, Cell, Column   │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: Sizing constants
//! - [`types`]: Column types and typed cell values
//! - [`memory`]: Bump arena with an optional hard limit
//! - [`row`]: Schema layout, `RowRef`/`RowView` and the owned `RowBuffer`
//! - [`key`]: Primary key successor and ordering
//! - [`predicate`]: Column range predicates built on the successor

#[macro_use]
mod macros;

pub mod config;
pub mod key;
pub mod memory;
pub mod predicate;
pub mod row;
pub mod types;

pub use key::{are_consecutive, compare_keys, increment_cell, increment_primary_key};
pub use memory::{Arena, ArenaConfig, ArenaError};
pub use predicate::{ColumnPredicate, PredicateKind};
pub use row::{RowBuffer, RowRef, RowView, Schema};
pub use types::{Cell, ColumnDef, DataType};
