//! # Type System for rowkey
//!
//! This module provides the column type system shared by schemas, packed
//! rows and the key successor engine.
//!
//! ## Module Structure
//!
//! - `data_type`: Closed `DataType` enum with slot sizes and signedness
//! - `column`: `ColumnDef` pairing a name with a type and nullability
//! - `cell`: Typed `Cell<'a>` values, borrowed for variable-length types
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `DataType` | Storage-level type discriminant |
//! | `ColumnDef` | Column definition |
//! | `Cell<'a>` | One column value, read from or written to a row |
//!
//! ## Usage
//!
//! ```ignore
//! use rowkey::types::{Cell, ColumnDef, DataType};
//!
//! let col = ColumnDef::new("k1", DataType::Int32);
//! let value = Cell::Int32(1000);
//! assert_eq!(value.data_type(), col.data_type());
//! ```

mod cell;
mod column;
mod data_type;

pub(crate) use cell::write_escaped;
pub use cell::Cell;
pub use column::ColumnDef;
pub use data_type::DataType;
