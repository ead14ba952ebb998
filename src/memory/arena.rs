//! # Byte Arena
//!
//! This module implements the monotonically-growing allocator that backs
//! variable-length cells created during key successor computation.
//!
//! ## Design Principles
//!
//! 1. **No individual frees**: Memory is reclaimed only when the whole arena drops
//! 2. **Stable buffers**: A handed-out buffer is never moved by later allocations
//! 3. **Hard limits**: A bounded arena refuses growth past its limit with `ArenaError`
//! 4. **Single-threaded**: `Arena` is `!Sync`; share one per thread or serialize access
//!
//! ## Growth
//!
//! The arena starts with one chunk of `initial_size` bytes and asks bumpalo
//! for additional chunks on demand. When a limit is configured, any new chunk
//! that would push the total allocated bytes past it is refused. bumpalo
//! rounds the first chunk up; if that chunk alone already exceeds the limit,
//! the arena serves allocations from it and refuses every further chunk.
//!
//! ```text
//! +-----------+  +-----------------------+  +-----------------------------+
//! | chunk 0   |  | chunk 1 (on demand)   |  | chunk 2 (on demand)         |
//! | initial   |  |                       |  |                             |
//! +-----------+  +-----------------------+  +-----------------------------+
//!  ^ buffers handed out from any chunk stay valid until the arena drops
//! ```

use std::alloc::Layout;

use bumpalo::Bump;
use eyre::{ensure, Result};
use tracing::debug;

use crate::config::{BOUNDED_ARENA_LIMIT, DEFAULT_ARENA_INITIAL_SIZE, DEFAULT_ARENA_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    initial_size: usize,
    limit: Option<usize>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_ARENA_INITIAL_SIZE,
            limit: DEFAULT_ARENA_LIMIT,
        }
    }
}

impl ArenaConfig {
    /// Small arena capped at `BOUNDED_ARENA_LIMIT` total bytes.
    pub fn bounded() -> Self {
        Self::default().limit(BOUNDED_ARENA_LIMIT)
    }

    pub fn initial_size(mut self, bytes: usize) -> Self {
        self.initial_size = bytes;
        self
    }

    pub fn limit(mut self, bytes: usize) -> Self {
        self.limit = Some(bytes);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.limit = None;
        self
    }

    pub fn initial_size_bytes(&self) -> usize {
        self.initial_size
    }

    pub fn limit_bytes(&self) -> Option<usize> {
        self.limit
    }
}

#[derive(Debug)]
pub struct ArenaError {
    pub requested: usize,
    pub allocated: usize,
    pub limit: Option<usize>,
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.limit {
            Some(limit) => write!(
                f,
                "arena allocation of {} bytes failed: {} of {} bytes already allocated",
                self.requested, self.allocated, limit
            ),
            None => write!(
                f,
                "arena allocation of {} bytes failed: system allocator refused a new chunk",
                self.requested
            ),
        }
    }
}

impl std::error::Error for ArenaError {}

pub struct Arena {
    bump: Bump,
    limit: Option<usize>,
    /// Byte count no allocation may push the arena past. Equals `limit`
    /// unless bumpalo rounded the first chunk above it, in which case it is
    /// the size of that chunk and no further chunk is permitted.
    ceiling: Option<usize>,
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("allocated_bytes", &self.bump.allocated_bytes())
            .field("limit", &self.limit)
            .finish()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// Creates an unbounded arena with the default initial chunk.
    pub fn new() -> Self {
        let config = ArenaConfig::default();
        Self {
            bump: Bump::with_capacity(config.initial_size),
            limit: config.limit,
            ceiling: None,
        }
    }

    pub fn with_config(config: ArenaConfig) -> Result<Self> {
        if let Some(limit) = config.limit {
            ensure!(
                limit >= config.initial_size,
                "arena limit {} is smaller than initial size {}",
                limit,
                config.initial_size
            );
        }

        let bump = Bump::with_capacity(config.initial_size);

        // bumpalo rounds the first chunk up, and treats a limit already
        // exceeded by allocated_bytes() as no limit at all.
        let ceiling = config.limit.map(|limit| {
            let first_chunk = bump.allocated_bytes();
            if first_chunk > limit {
                debug!(
                    limit,
                    first_chunk, "first arena chunk exceeds limit, further growth disabled"
                );
            }
            limit.max(first_chunk)
        });
        bump.set_allocation_limit(ceiling);

        Ok(Self {
            bump,
            limit: config.limit,
            ceiling,
        })
    }

    fn refusal(&self, len: usize) -> eyre::Report {
        let err = ArenaError {
            requested: len,
            allocated: self.bump.allocated_bytes(),
            limit: self.limit,
        };
        debug!(requested = len, allocated = err.allocated, limit = ?self.limit, "arena growth refused");
        eyre::Report::new(err)
    }

    fn exceeds_ceiling(&self) -> bool {
        self.ceiling
            .is_some_and(|ceiling| self.bump.allocated_bytes() > ceiling)
    }

    /// Allocates a zeroed buffer of exactly `len` bytes.
    ///
    /// The buffer stays valid, and is never moved, for as long as the arena
    /// lives. Fails with `ArenaError` if a new chunk is needed and cannot be
    /// obtained.
    #[allow(clippy::mut_from_ref)]
    pub fn allocate(&self, len: usize) -> Result<&mut [u8]> {
        let layout = Layout::array::<u8>(len)
            .map_err(|e| eyre::eyre!("invalid arena allocation of {} bytes: {}", len, e))?;

        if self.exceeds_ceiling() {
            return Err(self.refusal(len));
        }
        let ptr = match self.bump.try_alloc_layout(layout) {
            Ok(ptr) => ptr,
            Err(_) => return Err(self.refusal(len)),
        };
        // a chunk bumpalo added past the ceiling stays unused
        if self.exceeds_ceiling() {
            return Err(self.refusal(len));
        }

        // SAFETY: This is safe because:
        // 1. try_alloc_layout returned a non-null pointer to `len` bytes owned by the bump
        // 2. Every allocation gets a fresh region, so no other reference aliases it
        // 3. write_bytes initializes the whole region before a slice is formed
        // 4. bumpalo never moves or frees chunks before the Bump drops, and the
        //    returned lifetime is tied to &self
        let buf = unsafe {
            std::ptr::write_bytes(ptr.as_ptr(), 0, len);
            std::slice::from_raw_parts_mut(ptr.as_ptr(), len)
        };
        Ok(buf)
    }

    /// Copies `src` into a fresh arena buffer.
    pub fn copy_bytes(&self, src: &[u8]) -> Result<&[u8]> {
        let buf = self.allocate(src.len())?;
        buf.copy_from_slice(src);
        Ok(buf)
    }

    /// Total bytes held in backing chunks, used or not.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
