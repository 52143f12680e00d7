// Copyright (c) 2025 Kiai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Kiai filter.

use serde::{Deserialize, Serialize};

use crate::data_structures::kiai_filter::bits::BitStore;
use crate::data_structures::kiai_filter::config::{
    KiaiFilterConfig, DEFAULT_HASH_COUNT, DEFAULT_SIZE,
};
use crate::data_structures::kiai_filter::error::Result;
use crate::data_structures::kiai_filter::hash::IndexGenerator;

/// A Bloom filter over string keys.
///
/// Answers "definitely absent" or "possibly present" for a key using a fixed
/// bit array sized from the expected item count and target false positive
/// rate. Keys that were added are always reported present; keys that were
/// never added are reported present with probability about `p` while the
/// filter is within its designed capacity.
///
/// The filter has a single owner: [`add`](Self::add) takes `&mut self`. Wrap it
/// in [`SharedKiaiFilter`](super::SharedKiaiFilter) to share it between threads.
///
/// # Examples
///
/// ```
/// use kiai_lib::data_structures::kiai_filter::{KiaiFilter, KiaiFilterConfig};
///
/// // Create a filter with default configuration (1,000 items at 1%)
/// let mut filter = KiaiFilter::new();
///
/// filter.add("apple");
/// filter.add("banana");
///
/// assert!(filter.contains("apple"));
/// assert!(!filter.contains("orange"));
///
/// // Create a filter with custom configuration
/// let config = KiaiFilterConfig::new()
///     .with_expected_items(100_000)
///     .with_false_positive_rate(0.001);
///
/// let custom_filter = KiaiFilter::with_config(config).unwrap();
/// assert_eq!(custom_filter.stats().items_added, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KiaiFilter {
    /// Configuration the filter was built from
    config: KiaiFilterConfig,

    /// Bit array length (m)
    size: usize,

    /// Probes per key (k)
    hash_count: usize,

    /// Bit array
    bits: BitStore,

    /// Number of `add` calls, duplicates included
    items_added: u64,
}

impl KiaiFilter {
    /// Create a filter sized for 1,000 items at a 1% false positive rate.
    pub fn new() -> Self {
        Self::from_parts(KiaiFilterConfig::default(), DEFAULT_SIZE, DEFAULT_HASH_COUNT)
    }

    /// Create a filter for `expected_items` at `false_positive_rate`.
    pub fn with_params(expected_items: usize, false_positive_rate: f64) -> Result<Self> {
        Self::with_config(
            KiaiFilterConfig::new()
                .with_expected_items(expected_items)
                .with_false_positive_rate(false_positive_rate),
        )
    }

    /// Create a filter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero item count or a rate outside
    /// (0, 1), and `CapacityExceeded` when the derived size is too large.
    pub fn with_config(config: KiaiFilterConfig) -> Result<Self> {
        config.validate()?;
        let (size, hash_count) = config.dimensions()?;

        tracing::debug!(
            expected_items = config.expected_items(),
            false_positive_rate = config.false_positive_rate(),
            hash_scheme = %config.hash_scheme(),
            size,
            hash_count,
            "Created membership filter"
        );

        Ok(Self::from_parts(config, size, hash_count))
    }

    fn from_parts(config: KiaiFilterConfig, size: usize, hash_count: usize) -> Self {
        Self {
            config,
            size,
            hash_count,
            bits: BitStore::new(size),
            items_added: 0,
        }
    }

    /// Add a key to the filter.
    ///
    /// Sets the `k` bits the key hashes to and bumps the item counter. Adding
    /// the same key twice counts twice.
    pub fn add(&mut self, key: &str) {
        let scheme = self.config.hash_scheme();
        for seed in 1..=self.hash_count {
            let position = scheme.index(key, seed, self.size);
            self.bits.set(position);
        }
        self.items_added += 1;
    }

    /// Add every key from a sequence.
    pub fn add_all<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.add(key.as_ref());
        }
    }

    /// Returns true if the filter might contain the key.
    ///
    /// `false` means the key was never added. `true` means it probably was.
    /// Probing stops at the first clear bit.
    pub fn contains(&self, key: &str) -> bool {
        let scheme = self.config.hash_scheme();
        (1..=self.hash_count).all(|seed| self.bits.get(scheme.index(key, seed, self.size)))
    }

    /// Snapshot of the filter's sizing and fill state.
    pub fn stats(&self) -> FilterStats {
        let filled_bits = self.bits.count_set();
        FilterStats {
            expected_items: self.config.expected_items(),
            items_added: self.items_added,
            size: self.size,
            hash_count: self.hash_count,
            false_positive_rate: self.config.false_positive_rate(),
            filled_bits,
            fill_percentage: format_percentage(filled_bits, self.size),
        }
    }

    /// Fraction of bits set, between 0.0 and 1.0.
    pub fn fill_ratio(&self) -> f64 {
        self.bits.count_set() as f64 / self.size as f64
    }

    /// Probability that a never-added key is reported present, given the current fill.
    ///
    /// Computed as `fill_ratio ^ k`. Starts at zero and climbs past the
    /// configured rate once the filter is over capacity.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powi(self.hash_count.min(i32::MAX as usize) as i32)
    }

    /// Whether more items were added than the filter was sized for.
    pub fn is_over_capacity(&self) -> bool {
        self.items_added > self.config.expected_items() as u64
    }

    /// Get the configuration of this filter.
    pub fn config(&self) -> &KiaiFilterConfig {
        &self.config
    }

    /// Bit array length (m).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Probes per key (k).
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Number of `add` calls so far.
    pub fn items_added(&self) -> u64 {
        self.items_added
    }

    /// Underlying bit array.
    pub fn bits(&self) -> &BitStore {
        &self.bits
    }
}

impl Default for KiaiFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> Extend<S> for KiaiFilter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

/// Point-in-time statistics for a filter.
///
/// Serialises with camelCase field names so dashboards and the CLI's JSON
/// output see `expectedItems`, `fillPercentage` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    /// Capacity the filter was sized for (n)
    pub expected_items: usize,
    /// Number of `add` calls
    pub items_added: u64,
    /// Bit array length (m)
    pub size: usize,
    /// Probes per key (k)
    pub hash_count: usize,
    /// Configured target false positive rate (p)
    pub false_positive_rate: f64,
    /// Bits currently set
    pub filled_bits: usize,
    /// `filled_bits / size` as a percentage with two decimals, e.g. `"0.22%"`
    pub fill_percentage: String,
}

impl FilterStats {
    /// Whether `items_added` exceeds `expected_items`.
    pub fn is_over_capacity(&self) -> bool {
        self.items_added > self.expected_items as u64
    }
}

impl std::fmt::Display for FilterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expected_items={} items_added={} size={} hash_count={} false_positive_rate={} filled_bits={} fill={}",
            self.expected_items,
            self.items_added,
            self.size,
            self.hash_count,
            self.false_positive_rate,
            self.filled_bits,
            self.fill_percentage
        )
    }
}

/// Two-decimal percentage, rounding exact ties upwards.
///
/// `{:.2}` already rounds the exact binary value correctly except on ties,
/// where it picks the even digit. A non-negative `f64` sits exactly halfway
/// between two hundredths only when it is an odd multiple of 1/8.
fn format_percentage(filled_bits: usize, size: usize) -> String {
    let percentage = filled_bits as f64 / size as f64 * 100.0;

    let eighths = percentage * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let hundredths = (eighths * 12.5).ceil() as u64;
        return format!("{}.{:02}%", hundredths / 100, hundredths % 100);
    }

    format!("{percentage:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::kiai_filter::error::KiaiFilterError;
    use crate::data_structures::kiai_filter::hash::HashScheme;

    #[test]
    fn test_filter_basic() {
        let mut filter = KiaiFilter::new();

        filter.add("apple");
        filter.add("banana");
        filter.add("cherry");

        assert!(filter.contains("apple"));
        assert!(filter.contains("banana"));
        assert!(filter.contains("cherry"));
        assert!(!filter.contains("orange"));
    }

    #[test]
    fn test_new_matches_default_config() {
        let built = KiaiFilter::with_config(KiaiFilterConfig::default()).unwrap();
        assert_eq!(KiaiFilter::new(), built);
        assert_eq!(built.size(), 9_586);
        assert_eq!(built.hash_count(), 7);
    }

    #[test]
    fn test_empty_filter() {
        let filter = KiaiFilter::new();
        let stats = filter.stats();

        assert_eq!(stats.filled_bits, 0);
        assert_eq!(stats.items_added, 0);
        assert_eq!(stats.fill_percentage, "0.00%");
        assert_eq!(filter.fill_ratio(), 0.0);
        assert_eq!(filter.estimated_false_positive_rate(), 0.0);
        for key in ["", "apple", "anything"] {
            assert!(!filter.contains(key));
        }
    }

    #[test]
    fn test_stats_after_adds() {
        let mut filter = KiaiFilter::with_params(1_000, 0.01).unwrap();
        filter.add_all(["apple", "banana", "cherry"]);

        let stats = filter.stats();
        assert_eq!(stats.expected_items, 1_000);
        assert_eq!(stats.items_added, 3);
        assert_eq!(stats.size, 9_586);
        assert_eq!(stats.hash_count, 7);
        assert_eq!(stats.false_positive_rate, 0.01);
        assert_eq!(stats.filled_bits, 21);
        assert_eq!(stats.fill_percentage, "0.22%");
    }

    #[test]
    fn test_fill_percentage_rounds_ties_up() {
        assert_eq!(format_percentage(89, 160), "55.63%");
        assert_eq!(format_percentage(1, 800), "0.13%");
        assert_eq!(format_percentage(91, 160), "56.88%");
        assert_eq!(format_percentage(1, 8), "12.50%");
        assert_eq!(format_percentage(2, 3), "66.67%");
        assert_eq!(format_percentage(1, 3), "33.33%");
        assert_eq!(format_percentage(160, 160), "100.00%");
        assert_eq!(format_percentage(0, 160), "0.00%");
    }

    #[test]
    fn test_stats_percentage_on_tie() {
        // 160 bits and 28 probes; these four keys set 89 bits, exactly 55.625%
        let mut filter = KiaiFilter::with_params(4, 5e-9).unwrap();
        assert_eq!(filter.size(), 160);
        filter.add_all(["apple", "banana", "kiwi", "mango"]);

        let stats = filter.stats();
        assert_eq!(stats.filled_bits, 89);
        assert_eq!(stats.fill_percentage, "55.63%");
    }

    #[test]
    fn test_duplicate_adds_are_counted() {
        let mut filter = KiaiFilter::new();
        filter.add("apple");
        let filled = filter.stats().filled_bits;
        filter.add("apple");

        assert_eq!(filter.items_added(), 2);
        assert_eq!(filter.stats().filled_bits, filled);
    }

    #[test]
    fn test_empty_key() {
        let mut filter = KiaiFilter::new();
        assert!(!filter.contains(""));
        filter.add("");
        assert!(filter.contains(""));
        assert_eq!(filter.items_added(), 1);
    }

    #[test]
    fn test_extend() {
        let mut filter = KiaiFilter::new();
        filter.extend(vec!["dog".to_string(), "cat".to_string()]);

        assert!(filter.contains("dog"));
        assert!(filter.contains("cat"));
        assert_eq!(filter.items_added(), 2);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            KiaiFilter::with_params(0, 0.01),
            Err(KiaiFilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            KiaiFilter::with_params(1_000, 1.0),
            Err(KiaiFilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            KiaiFilter::with_params(usize::MAX, 1e-300),
            Err(KiaiFilterError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_capacity_tracking() {
        let mut filter = KiaiFilter::with_params(10, 0.1).unwrap();
        for i in 0..10 {
            filter.add(&format!("item-{i}"));
        }
        assert!(!filter.is_over_capacity());
        assert!(!filter.stats().is_over_capacity());

        filter.add("one-too-many");
        assert!(filter.is_over_capacity());
        assert!(filter.stats().is_over_capacity());
    }

    #[test]
    fn test_saturation_raises_estimate() {
        let mut filter = KiaiFilter::with_params(10, 0.1).unwrap();
        for i in 0..10 {
            filter.add(&format!("item-{i}"));
        }
        let at_capacity = filter.estimated_false_positive_rate();

        for i in 10..200 {
            filter.add(&format!("item-{i}"));
        }
        assert!(filter.estimated_false_positive_rate() > at_capacity);
        assert!(filter.fill_ratio() <= 1.0);
    }

    #[test]
    fn test_fnv_scheme() {
        let config = KiaiFilterConfig::new().with_hash_scheme(HashScheme::Fnv);
        let mut filter = KiaiFilter::with_config(config).unwrap();
        filter.add_all(["apple", "banana", "cherry"]);

        assert!(filter.contains("apple"));
        assert!(filter.contains("banana"));
        assert!(filter.contains("cherry"));
        assert!(!filter.contains("orange"));
        assert_eq!(filter.stats().filled_bits, 21);
    }

    #[test]
    fn test_stats_serialization() {
        let mut filter = KiaiFilter::new();
        filter.add("apple");

        let json = serde_json::to_value(filter.stats()).unwrap();
        assert_eq!(json["expectedItems"], 1_000);
        assert_eq!(json["itemsAdded"], 1);
        assert_eq!(json["size"], 9_586);
        assert_eq!(json["hashCount"], 7);
        assert_eq!(json["falsePositiveRate"], 0.01);
        assert_eq!(json["filledBits"], 7);
        assert_eq!(json["fillPercentage"], "0.07%");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0, 9_586), "0.00%");
        assert_eq!(format_percentage(1, 3), "33.33%");
        assert_eq!(format_percentage(2, 3), "66.67%");
        assert_eq!(format_percentage(5, 5), "100.00%");
    }
}
