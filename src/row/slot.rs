//! # Indirect Slot Layout
//!
//! Variable-length columns store an indirect reference in their row slot
//! instead of the bytes themselves:
//!
//! ```text
//! +------------------+------------------+
//! | Cell Ordinal     | Length           |
//! | (u32 LE)         | (u32 LE)         |
//! +------------------+------------------+
//! ```
//!
//! The ordinal selects an entry of the row's cell table, which holds the
//! borrowed `&[u8]`. Readers check both fields against the table so a
//! corrupt slot surfaces as an error instead of an out-of-bounds read.

use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::config::VAR_SLOT_SIZE;

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct VarSlot {
    ordinal: U32,
    len: U32,
}

const _: () = assert!(std::mem::size_of::<VarSlot>() == VAR_SLOT_SIZE);

impl VarSlot {
    pub fn new(ordinal: u32, len: u32) -> Self {
        Self {
            ordinal: U32::new(ordinal),
            len: U32::new(len),
        }
    }

    zerocopy_accessors! {
        ordinal: u32,
        len: u32,
    }
}
