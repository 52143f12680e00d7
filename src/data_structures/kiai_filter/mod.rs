// Copyright (c) 2025 Kiai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Kiai filter for existence-check acceleration.
//!
//! A space-efficient probabilistic set-membership filter over string keys. It
//! sits in front of an expensive exact lookup (disk, network, database) and
//! answers "definitely absent" without touching the backing store, or
//! "possibly present" when the lookup is still needed.
//!
//! # Features
//!
//! - Sizing from a target capacity and false positive rate.
//! - Deterministic, reproducible probe positions (stepwise-modulo djb2 by
//!   default, seeded FNV-1a on request).
//! - No false negatives.
//! - Fill statistics for observing saturation.
//!
//! # Example
//!
//! ```
//! use kiai_lib::data_structures::kiai_filter::KiaiFilter;
//!
//! let mut filter = KiaiFilter::with_params(1_000, 0.01).unwrap();
//!
//! filter.add("apple");
//! filter.add("banana");
//! filter.add("cherry");
//!
//! assert!(filter.contains("apple"));
//! assert!(!filter.contains("orange"));
//!
//! let stats = filter.stats();
//! assert_eq!(stats.size, 9_586);
//! assert_eq!(stats.hash_count, 7);
//! assert_eq!(stats.fill_percentage, "0.22%");
//! ```
//!
//! # Fronting an exact lookup
//!
//! ```
//! use kiai_lib::data_structures::kiai_filter::KiaiFilter;
//! use std::collections::HashMap;
//!
//! struct GuardedStore {
//!     filter: KiaiFilter,
//!     backing: HashMap<String, String>,
//! }
//!
//! impl GuardedStore {
//!     fn get(&self, key: &str) -> Option<&String> {
//!         // One clear bit proves absence; skip the expensive lookup
//!         if !self.filter.contains(key) {
//!             return None;
//!         }
//!         self.backing.get(key)
//!     }
//! }
//! ```
//!
//! # Capacity
//!
//! Adding more items than `expected_items` is allowed but silently degrades
//! the false positive rate. Use [`KiaiFilter::is_over_capacity`] and
//! [`KiaiFilter::estimated_false_positive_rate`] to watch for it.

// Module declarations
mod bits;
mod config;
mod error;
mod filter;
mod hash;
mod shared;

// Re-exports
pub use bits::BitStore;
pub use config::{
    max_size, KiaiFilterConfig, SizingPolicy, DEFAULT_EXPECTED_ITEMS,
    DEFAULT_FALSE_POSITIVE_RATE, MAX_SIZE,
};
pub use error::{KiaiFilterError, Result};
pub use filter::{FilterStats, KiaiFilter};
pub use hash::{Djb2IndexGenerator, FnvIndexGenerator, HashScheme, IndexGenerator};
pub use shared::SharedKiaiFilter;
