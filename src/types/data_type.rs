//! # Column Data Types
//!
//! This module provides the canonical `DataType` enum used by schemas, row
//! slots and key successor computation.
//!
//! ## Type Categories
//!
//! | Category | Types | Slot Size |
//! |----------|-------|-----------|
//! | **Signed integer** | Int8, Int16, Int32, Int64 | 1, 2, 4, 8 bytes |
//! | **Unsigned integer** | UInt8, UInt16, UInt32, UInt64 | 1, 2, 4, 8 bytes |
//! | **Other fixed** | Bool, Float, Double | 1, 4, 8 bytes |
//! | **Variable** | String, Binary | 8 byte indirect slot |
//!
//! Only integer and variable types can take part in key successor
//! computation. Bool, Float and Double are storable but rejected as
//! incrementable key columns.
//!
//! ## Discriminant Values
//!
//! - 0-7: Fixed-width integers (signed then unsigned)
//! - 10-12: Other fixed-width primitives
//! - 20-21: Variable-length byte strings

use crate::config::VAR_SLOT_SIZE;

/// Closed set of column types.
///
/// Uses `#[repr(u8)]` for single-byte storage encoding.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8 = 0,
    Int16 = 1,
    Int32 = 2,
    Int64 = 3,
    UInt8 = 4,
    UInt16 = 5,
    UInt32 = 6,
    UInt64 = 7,

    Bool = 10,
    Float = 11,
    Double = 12,

    String = 20,
    Binary = 21,
}

impl DataType {
    /// Returns the inline byte size for this type, or None for variable-length types.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            DataType::Int8 | DataType::UInt8 | DataType::Bool => Some(1),
            DataType::Int16 | DataType::UInt16 => Some(2),
            DataType::Int32 | DataType::UInt32 | DataType::Float => Some(4),
            DataType::Int64 | DataType::UInt64 | DataType::Double => Some(8),
            DataType::String | DataType::Binary => None,
        }
    }

    /// Returns the number of bytes this type occupies in a packed row.
    pub fn slot_size(&self) -> usize {
        self.fixed_size().unwrap_or(VAR_SLOT_SIZE)
    }

    pub fn is_variable(&self) -> bool {
        self.fixed_size().is_none()
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
        )
    }

    /// Returns true if key successor computation is defined for this type.
    pub fn is_incrementable(&self) -> bool {
        self.is_integer() || self.is_variable()
    }

    /// Lowercase type name used when rendering rows.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::UInt8 => "uint8",
            DataType::UInt16 => "uint16",
            DataType::UInt32 => "uint32",
            DataType::UInt64 => "uint64",
            DataType::Bool => "bool",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
            DataType::Binary => "binary",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for DataType {
    type Error = eyre::Report;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DataType::Int8),
            1 => Ok(DataType::Int16),
            2 => Ok(DataType::Int32),
            3 => Ok(DataType::Int64),
            4 => Ok(DataType::UInt8),
            5 => Ok(DataType::UInt16),
            6 => Ok(DataType::UInt32),
            7 => Ok(DataType::UInt64),
            10 => Ok(DataType::Bool),
            11 => Ok(DataType::Float),
            12 => Ok(DataType::Double),
            20 => Ok(DataType::String),
            21 => Ok(DataType::Binary),
            _ => eyre::bail!("invalid DataType discriminant: {}", value),
        }
    }
}
