//! # Memory Management
//!
//! This module provides the arena that owns variable-length cell storage
//! created while computing key successors.
//!
//! ## Ownership Model
//!
//! A row never owns the bytes of its variable-length cells. Each cell borrows
//! either caller memory (no-copy setters) or arena memory. The borrow checker
//! enforces that an arena outlives every row holding cells allocated from it:
//!
//! ```rust,ignore
//! let arena = Arena::new();
//! let mut row = RowBuffer::new(&schema);
//! row.set_string_no_copy(0, b"hello")?;
//! increment_primary_key(&mut row.view_mut(), 1, &arena)?;
//! // row now references "hello\0" inside `arena`
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! // Unbounded, 1 KB first chunk
//! let arena = Arena::new();
//!
//! // Bounded: allocations fail with ArenaError past 4 KB total
//! let arena = Arena::with_config(ArenaConfig::bounded())?;
//! ```

mod arena;

pub use arena::{Arena, ArenaConfig, ArenaError};
