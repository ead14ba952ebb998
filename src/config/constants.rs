//! # Configuration Constants
//!
//! This module centralizes all sizing constants, grouping interdependent
//! values together. Import them from here rather than redefining locally:
//!
//! ```ignore
//! use crate::config::{DEFAULT_ARENA_INITIAL_SIZE, VAR_SLOT_SIZE};
//! ```
//!
//! ## Dependency Graph
//!
//! ```text
//! VAR_SLOT_SIZE (8 bytes)
//!       │
//!       ├─> VAR_SLOT_ORDINAL_SIZE (4 bytes, u32 cell ordinal)
//!       │
//!       └─> VAR_SLOT_LENGTH_SIZE (4 bytes, u32 byte length)
//!             Caps a single variable cell at MAX_CELL_LEN bytes
//!
//! DEFAULT_ARENA_INITIAL_SIZE (1024 bytes)
//!       │
//!       └─> DEFAULT_ARENA_LIMIT (None = grow until the system allocator fails)
//!             When set, the limit must be >= the initial size
//! ```
//!
//! ## Critical Invariants
//!
//! 1. `VAR_SLOT_SIZE == VAR_SLOT_ORDINAL_SIZE + VAR_SLOT_LENGTH_SIZE`
//! 2. `MAX_CELL_LEN` fits in the slot's length field
//! 3. `MAX_FIXED_SLOT_SIZE` covers the widest fixed-width type

// ============================================================================
// ROW SLOT LAYOUT
// Every column owns exactly one slot in the packed row buffer
// ============================================================================

/// Size of the (ordinal, length) indirect reference stored for variable columns.
pub const VAR_SLOT_SIZE: usize = 8;

/// Bytes used by the cell ordinal inside a variable slot.
pub const VAR_SLOT_ORDINAL_SIZE: usize = 4;

/// Bytes used by the byte length inside a variable slot.
pub const VAR_SLOT_LENGTH_SIZE: usize = 4;

/// Largest variable cell the slot's length field can describe.
pub const MAX_CELL_LEN: usize = u32::MAX as usize;

/// Widest inline value (int64, uint64, double).
pub const MAX_FIXED_SLOT_SIZE: usize = 8;

const _: () = assert!(
    VAR_SLOT_SIZE == VAR_SLOT_ORDINAL_SIZE + VAR_SLOT_LENGTH_SIZE,
    "VAR_SLOT_SIZE must hold exactly one ordinal and one length"
);

const _: () = assert!(
    MAX_CELL_LEN as u64 == (1u64 << (VAR_SLOT_LENGTH_SIZE * 8)) - 1,
    "MAX_CELL_LEN must match the slot length field width"
);

const _: () = assert!(MAX_FIXED_SLOT_SIZE == 8, "int64 is the widest fixed slot");

// ============================================================================
// ARENA CONFIGURATION
// Backing storage for cells grown by key successor computation
// ============================================================================

/// Capacity of the first arena chunk in bytes.
pub const DEFAULT_ARENA_INITIAL_SIZE: usize = 1024;

/// Upper bound on total arena bytes. `None` leaves growth unbounded.
pub const DEFAULT_ARENA_LIMIT: Option<usize> = None;

/// Total limit applied by `ArenaConfig::bounded`.
pub const BOUNDED_ARENA_LIMIT: usize = 4096;

const _: () = assert!(
    DEFAULT_ARENA_INITIAL_SIZE <= BOUNDED_ARENA_LIMIT,
    "initial arena chunk must fit under the bounded limit"
);
