//! # Column Definitions
//!
//! A `ColumnDef` pairs a column name with its `DataType` and nullability.
//! Primary key columns are never nullable; `Schema::new` rejects a
//! nullable key column.
//!
//! ## Usage
//!
//! ```ignore
//! use rowkey::types::{ColumnDef, DataType};
//!
//! let key = ColumnDef::new("id", DataType::Int32);
//! let note = ColumnDef::nullable("note", DataType::String);
//! ```

use super::DataType;

/// Column definition with type and nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    name: String,
    data_type: DataType,
    nullable: bool,
}

impl ColumnDef {
    /// Creates a non-nullable column.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    /// Creates a nullable column.
    pub fn nullable(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}
