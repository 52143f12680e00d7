// Copyright (c) 2025 Kiai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Kiai filter.

/// Errors that can occur while constructing a Kiai filter.
///
/// Only construction can fail. Once a filter exists, `add`, `contains` and
/// `stats` have no error path.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum KiaiFilterError {
    /// Expected item count or false positive rate is out of range
    #[error("Invalid filter parameter: {0}")]
    InvalidParameter(String),

    /// The derived bit array would not fit in the addressable index range
    #[error("Filter size exceeds capacity: {requested} bits requested, at most {max} supported")]
    CapacityExceeded {
        /// Size the sizing formula asked for (may be infinite)
        requested: f64,
        /// Largest supported size in bits
        max: usize,
    },
}

/// Result type for Kiai filter operations
pub type Result<T> = std::result::Result<T, KiaiFilterError>;
