//! Filter configuration module.
//!
//! This module defines the configuration used to size and build the
//! membership filter: capacity, target error rate and hash scheme.

use super::{ConfigResult, Validate};
use crate::data_structures::kiai_filter::{
    HashScheme, KiaiFilterConfig, DEFAULT_EXPECTED_ITEMS, DEFAULT_FALSE_POSITIVE_RATE,
};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterSettings {
    /// Number of keys the filter is sized for
    pub expected_items: usize,

    /// Target false positive rate at capacity, between 0.0 and 1.0 exclusive
    pub false_positive_rate: f64,

    /// Index generation scheme ("djb2" or "fnv")
    pub hash_scheme: HashScheme,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            expected_items: DEFAULT_EXPECTED_ITEMS,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            hash_scheme: HashScheme::default(),
        }
    }
}

impl FilterSettings {
    /// Build the filter configuration these settings describe.
    pub fn to_filter_config(&self) -> KiaiFilterConfig {
        KiaiFilterConfig::new()
            .with_expected_items(self.expected_items)
            .with_false_positive_rate(self.false_positive_rate)
            .with_hash_scheme(self.hash_scheme)
    }
}

impl Validate for FilterSettings {
    fn validate(&self) -> ConfigResult<()> {
        // Sizing also catches configurations too large to allocate
        self.to_filter_config()
            .dimensions()
            .map(|_| ())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
