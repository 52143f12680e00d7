// Copyright (c) 2025 Kiai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration and sizing math for the Kiai filter.

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::data_structures::kiai_filter::error::{KiaiFilterError, Result};
use crate::data_structures::kiai_filter::hash::HashScheme;

/// Default number of items a filter is tuned for.
pub const DEFAULT_EXPECTED_ITEMS: usize = 1_000;

/// Default target false positive probability.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// Bit array size derived from the default item count and rate.
pub const DEFAULT_SIZE: usize = 9_586;

/// Hash count derived from the default item count and rate.
pub const DEFAULT_HASH_COUNT: usize = 7;

/// Largest bit array size, in bits, a filter may be sized to.
///
/// The effective limit is the smaller of this and `usize::MAX`.
pub const MAX_SIZE: u64 = i32::MAX as u64 * 64;

/// Configuration for the Kiai filter.
///
/// Holds the two tuning inputs (capacity and target error rate) plus the
/// index generation scheme. Nothing is validated until a filter is built
/// from it, or until [`KiaiFilterConfig::validate`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KiaiFilterConfig {
    /// Number of items the filter is sized for (n)
    expected_items: usize,

    /// Target probability of false positives at capacity (p), in (0, 1)
    false_positive_rate: f64,

    /// Family of index generators used for probing
    hash_scheme: HashScheme,
}

impl KiaiFilterConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - expected_items: 1,000
    /// - false_positive_rate: 0.01 (1%)
    /// - hash_scheme: [`HashScheme::Djb2`]
    pub fn new() -> Self {
        Self {
            expected_items: DEFAULT_EXPECTED_ITEMS,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            hash_scheme: HashScheme::default(),
        }
    }

    /// Set the expected number of items to be added to the filter.
    pub fn with_expected_items(mut self, expected_items: usize) -> Self {
        self.expected_items = expected_items;
        self
    }

    /// Set the target false positive rate (between 0.0 and 1.0 exclusive).
    ///
    /// Lower values increase accuracy but require more memory.
    pub fn with_false_positive_rate(mut self, false_positive_rate: f64) -> Self {
        self.false_positive_rate = false_positive_rate;
        self
    }

    /// Select the index generation scheme.
    pub fn with_hash_scheme(mut self, hash_scheme: HashScheme) -> Self {
        self.hash_scheme = hash_scheme;
        self
    }

    /// Expected number of items (n).
    pub fn expected_items(&self) -> usize {
        self.expected_items
    }

    /// Target false positive rate (p).
    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    /// Index generation scheme.
    pub fn hash_scheme(&self) -> HashScheme {
        self.hash_scheme
    }

    /// Check that `expected_items` is positive and `false_positive_rate` lies in (0, 1).
    pub fn validate(&self) -> Result<()> {
        SizingPolicy::check_expected_items(self.expected_items)?;
        SizingPolicy::check_false_positive_rate(self.false_positive_rate)
    }

    /// Derive `(size, hash_count)` for this configuration.
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        let size = SizingPolicy::compute_size(self.expected_items, self.false_positive_rate)?;
        let hash_count = SizingPolicy::compute_hash_count(size, self.expected_items)?;
        Ok((size, hash_count))
    }
}

impl Default for KiaiFilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Classic Bloom filter sizing formulas.
///
/// Both computations run in `f64` in a fixed evaluation order so the derived
/// dimensions are reproducible across platforms:
///
/// - `m = ceil(-(n * ln(p)) / (ln 2)^2)`
/// - `k = ceil((m / n) * ln 2)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SizingPolicy;

impl SizingPolicy {
    /// Compute the bit array size `m` for `expected_items` at `false_positive_rate`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `expected_items` is zero or the rate is outside (0, 1),
    /// `CapacityExceeded` if the result does not fit in [`max_size`].
    pub fn compute_size(expected_items: usize, false_positive_rate: f64) -> Result<usize> {
        Self::check_expected_items(expected_items)?;
        Self::check_false_positive_rate(false_positive_rate)?;

        let n = expected_items as f64;
        let m = (-(n * false_positive_rate.ln()) / LN_2.powi(2)).ceil();

        let max = max_size();
        if !m.is_finite() || m > max as f64 {
            return Err(KiaiFilterError::CapacityExceeded { requested: m, max });
        }

        Ok((m as usize).max(1))
    }

    /// Compute the hash count `k` for a bit array of `size` bits holding `expected_items`.
    pub fn compute_hash_count(size: usize, expected_items: usize) -> Result<usize> {
        Self::check_expected_items(expected_items)?;
        if size == 0 {
            return Err(KiaiFilterError::InvalidParameter(
                "size must be greater than 0".to_string(),
            ));
        }

        let k = ((size as f64 / expected_items as f64) * LN_2).ceil();
        Ok((k as usize).max(1))
    }

    fn check_expected_items(expected_items: usize) -> Result<()> {
        if expected_items == 0 {
            return Err(KiaiFilterError::InvalidParameter(
                "expected_items must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn check_false_positive_rate(false_positive_rate: f64) -> Result<()> {
        // Written negated so NaN is rejected too
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(KiaiFilterError::InvalidParameter(format!(
                "false_positive_rate must be between 0.0 and 1.0 exclusive, got {false_positive_rate}"
            )));
        }
        Ok(())
    }
}

/// Largest supported bit array size on this platform.
pub fn max_size() -> usize {
    usize::try_from(MAX_SIZE).unwrap_or(usize::MAX)
}
