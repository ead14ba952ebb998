//! # Configuration Module
//!
//! This module centralizes the sizing constants for rowkey. Constants that
//! depend on each other are co-located and their relationships are enforced
//! through compile-time assertions.
//!
//! ## Module Organization
//!
//! - [`constants`]: Arena sizing and row slot layout values

pub mod constants;
pub use constants::*;
