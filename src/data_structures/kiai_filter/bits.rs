// Copyright (c) 2025 Kiai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixed-length bit array backing the Kiai filter.

const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-length array of single-bit flags packed into 64-bit words.
///
/// All bits start cleared. Bits can only be set, never cleared, and the
/// array never changes length after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStore {
    /// Packed bits, least significant bit first within each word
    words: Vec<u64>,

    /// Number of addressable bits
    len: usize,
}

impl BitStore {
    /// Create a store of `len` cleared bits.
    pub fn new(len: usize) -> Self {
        let word_count = len.div_ceil(WORD_BITS);
        Self {
            words: vec![0; word_count],
            len,
        }
    }

    /// Set bit `index` to 1. Setting an already-set bit is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
    }

    /// Return whether bit `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range for length {}", self.len);
        self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// Number of bits currently set.
    pub fn count_set(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Number of addressable bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the store has no addressable bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_clear() {
        let store = BitStore::new(130);
        assert_eq!(store.len(), 130);
        assert_eq!(store.count_set(), 0);
        assert!((0..130).all(|i| !store.get(i)));
    }

    #[test]
    fn test_set_and_get() {
        let mut store = BitStore::new(200);
        for i in [0, 1, 63, 64, 127, 128, 199] {
            store.set(i);
        }

        for i in 0..200 {
            let expected = matches!(i, 0 | 1 | 63 | 64 | 127 | 128 | 199);
            assert_eq!(store.get(i), expected, "bit {i}");
        }
        assert_eq!(store.count_set(), 7);
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut store = BitStore::new(10);
        store.set(3);
        let once = store.clone();
        store.set(3);

        assert_eq!(store, once);
        assert_eq!(store.count_set(), 1);
    }

    #[test]
    fn test_single_bit_store() {
        let mut store = BitStore::new(1);
        assert!(!store.get(0));
        store.set(0);
        assert!(store.get(0));
        assert_eq!(store.count_set(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_out_of_range() {
        let mut store = BitStore::new(64);
        store.set(64);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        // Bit 65 lives in an allocated word but is past the logical end
        let store = BitStore::new(65);
        store.get(65);
    }
}
