//! # Typed Cell Values
//!
//! `Cell` is the tagged value of a single column: integers, bools and floats
//! are carried inline, strings and binaries borrow their bytes for `'a`.
//! The borrowed bytes are owned either by the caller (no-copy setters) or by
//! an `Arena` that outlives every row referencing them.
//!
//! ## Rendering
//!
//! `Display` prints the value the way row dumps show it. Byte strings are
//! C-escaped: printable ASCII passes through, common control characters use
//! their short escapes, and every other byte becomes a three-digit octal
//! escape (`\000`).

use std::fmt;

use super::DataType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Bool(bool),
    Float(f32),
    Double(f64),
    String(&'a [u8]),
    Binary(&'a [u8]),
}

impl<'a> Cell<'a> {
    pub fn data_type(&self) -> DataType {
        match self {
            Cell::Int8(_) => DataType::Int8,
            Cell::Int16(_) => DataType::Int16,
            Cell::Int32(_) => DataType::Int32,
            Cell::Int64(_) => DataType::Int64,
            Cell::UInt8(_) => DataType::UInt8,
            Cell::UInt16(_) => DataType::UInt16,
            Cell::UInt32(_) => DataType::UInt32,
            Cell::UInt64(_) => DataType::UInt64,
            Cell::Bool(_) => DataType::Bool,
            Cell::Float(_) => DataType::Float,
            Cell::Double(_) => DataType::Double,
            Cell::String(_) => DataType::String,
            Cell::Binary(_) => DataType::Binary,
        }
    }

    /// Returns the referenced bytes for variable-length cells.
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            Cell::String(bytes) | Cell::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }
}

pub(crate) fn write_escaped(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for &b in bytes {
        match b {
            b'\n' => f.write_str("\\n")?,
            b'\r' => f.write_str("\\r")?,
            b'\t' => f.write_str("\\t")?,
            b'\\' => f.write_str("\\\\")?,
            b'"' => f.write_str("\\\"")?,
            b'\'' => f.write_str("\\'")?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\{:03o}", b)?,
        }
    }
    Ok(())
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int8(v) => write!(f, "{}", v),
            Cell::Int16(v) => write!(f, "{}", v),
            Cell::Int32(v) => write!(f, "{}", v),
            Cell::Int64(v) => write!(f, "{}", v),
            Cell::UInt8(v) => write!(f, "{}", v),
            Cell::UInt16(v) => write!(f, "{}", v),
            Cell::UInt32(v) => write!(f, "{}", v),
            Cell::UInt64(v) => write!(f, "{}", v),
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Double(v) => write!(f, "{}", v),
            Cell::String(bytes) | Cell::Binary(bytes) => write_escaped(f, bytes),
        }
    }
}
