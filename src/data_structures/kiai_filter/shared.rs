// Copyright (c) 2025 Kiai Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lock-guarded handle for sharing a Kiai filter between threads.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::data_structures::kiai_filter::filter::{FilterStats, KiaiFilter};

/// A cloneable, thread-safe handle to a [`KiaiFilter`].
///
/// Queries take a shared read lock, adds take the write lock, so the bit
/// updates and the item counter of one `add` are never observed half done.
#[derive(Debug, Clone)]
pub struct SharedKiaiFilter {
    inner: Arc<RwLock<KiaiFilter>>,
}

impl SharedKiaiFilter {
    /// Wrap an existing filter.
    pub fn new(filter: KiaiFilter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(filter)),
        }
    }

    /// Add a key under the write lock.
    pub fn add(&self, key: &str) {
        self.inner.write().add(key);
    }

    /// Add a batch of keys while holding the write lock once.
    pub fn add_all<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.write().add_all(keys);
    }

    /// Query a key under a read lock.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    /// Statistics under a read lock.
    pub fn stats(&self) -> FilterStats {
        self.inner.read().stats()
    }

    /// Clone of the current filter state.
    pub fn snapshot(&self) -> KiaiFilter {
        self.inner.read().clone()
    }
}

impl From<KiaiFilter> for SharedKiaiFilter {
    fn from(filter: KiaiFilter) -> Self {
        Self::new(filter)
    }
}
