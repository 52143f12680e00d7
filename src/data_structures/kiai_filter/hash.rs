// Copyright (c) 2025 Kiai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Index generation for the Kiai filter.
//!
//! A filter probes `k` positions per key by calling an [`IndexGenerator`] with
//! seeds `1..=k`. Two families are provided:
//!
//! - [`Djb2IndexGenerator`]: multiplicative djb2 hash reduced modulo `m` at every
//!   step. This is the reference scheme; its positions are bit-for-bit stable.
//! - [`FnvIndexGenerator`]: FNV-1a over the seed followed by the key, reduced
//!   once at the end. Better spread for keys of equal length.

use std::hash::Hasher;

use serde::{Deserialize, Serialize};

/// Maps a key and a probe seed to a position in `[0, size)`.
pub trait IndexGenerator {
    /// Compute the position probed for `key` with the given `seed`.
    ///
    /// Must be deterministic for a fixed `(key, seed, size)` triple and must
    /// return a value strictly less than `size`. `size` is never zero.
    fn index(&self, key: &str, seed: usize, size: usize) -> usize;
}

/// Starting value of the djb2 accumulator before the seed offset is added.
const DJB2_BASIS: u64 = 5381;

/// djb2 multiplier.
const DJB2_MULTIPLIER: u64 = 33;

/// Reference djb2 index generator with stepwise modulo reduction.
///
/// The accumulator starts at `5381 + seed`, then for every UTF-16 code unit
/// `c` of the key it becomes `(acc * 33 + c) % size`. Reducing at every step
/// keeps the accumulator below `size`, so the arithmetic never overflows for
/// any size up to [`MAX_SIZE`](super::config::MAX_SIZE).
#[derive(Debug, Clone, Copy, Default)]
pub struct Djb2IndexGenerator;

impl IndexGenerator for Djb2IndexGenerator {
    fn index(&self, key: &str, seed: usize, size: usize) -> usize {
        let modulus = size as u64;
        let mut acc = DJB2_BASIS + seed as u64;

        for unit in key.encode_utf16() {
            acc = (acc * DJB2_MULTIPLIER + u64::from(unit)) % modulus;
        }

        // The empty key never enters the loop, so reduce once more
        (acc % modulus) as usize
    }
}

/// FNV-1a index generator.
///
/// Hashes the seed as 8 little-endian bytes, then the key's UTF-8 bytes, and
/// reduces the 64-bit digest modulo `size`. Putting the seed first lets every
/// key byte mix into each probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct FnvIndexGenerator;

impl IndexGenerator for FnvIndexGenerator {
    fn index(&self, key: &str, seed: usize, size: usize) -> usize {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(&(seed as u64).to_le_bytes());
        hasher.write(key.as_bytes());
        (hasher.finish() % size as u64) as usize
    }
}

/// Selectable index generation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashScheme {
    /// Stepwise-modulo djb2, compatible with reference outputs
    #[default]
    Djb2,
    /// Seeded FNV-1a, hash then reduce
    Fnv,
}

impl IndexGenerator for HashScheme {
    #[inline]
    fn index(&self, key: &str, seed: usize, size: usize) -> usize {
        match self {
            Self::Djb2 => Djb2IndexGenerator.index(key, seed, size),
            Self::Fnv => FnvIndexGenerator.index(key, seed, size),
        }
    }
}

impl std::fmt::Display for HashScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Djb2 => write!(f, "djb2"),
            Self::Fnv => write!(f, "fnv"),
        }
    }
}

impl std::str::FromStr for HashScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "djb2" => Ok(Self::Djb2),
            "fnv" => Ok(Self::Fnv),
            other => Err(format!("unknown hash scheme: {other} (expected djb2 or fnv)")),
        }
    }
}
