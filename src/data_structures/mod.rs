//! Data structures for Kiai.
//!
//! This module contains the probabilistic membership filter and its building
//! blocks. All implementations adhere to the project requirements:
//! - No unsafe code
//! - No I/O inside the data structures themselves
//! - Deterministic, reproducible behavior for a fixed configuration

pub mod kiai_filter;

// Re-export common data structures
pub use kiai_filter::{FilterStats, KiaiFilter, KiaiFilterConfig, KiaiFilterError, SharedKiaiFilter};
