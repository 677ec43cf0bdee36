//! Cache Store Module
//!
//! HashMap-backed storage with lazy TTL expiration. Not synchronized on its own;
//! `MemoryTtlCache` provides the locking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key-value storage where every operation is evaluated at an explicit instant.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Hit/miss statistics
    stats: CacheStats,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair, replacing both value and expiry of any previous entry.
    ///
    /// A zero `ttl` stores an entry that never expires.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration, now: Instant) {
        self.entries
            .insert(key.into(), CacheEntry::new(value, ttl, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key as of `now`.
    ///
    /// An expired entry is removed by this call and reported as absent.
    pub fn get(&mut self, key: &str, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.set_total_entries(self.entries.len());
            self.stats.record_expiration();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Retrieves a live value without evicting or touching statistics.
    pub fn peek(&self, key: &str, now: Instant) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key. Returns true if an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, including expired ones not yet touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
