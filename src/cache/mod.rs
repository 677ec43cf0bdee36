//! Cache Module
//!
//! Provides an in-memory key-value cache with lazy, per-entry TTL expiration.

mod clock;
mod entry;
mod memory;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use memory::MemoryTtlCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == TTL Cache Trait ==
/// Key-value cache backend with per-key time-based expiry.
///
/// A `ttl` of `Duration::ZERO` stores an entry that never expires.
#[async_trait]
pub trait TtlCache<V>: Send + Sync {
    /// Retrieves the value associated with a key, if present and not expired.
    async fn get(&self, key: &str) -> Option<V>;

    /// Like `get`, but leaves entries and statistics untouched.
    async fn peek(&self, key: &str) -> Option<V>;

    /// Inserts or overwrites a key with the specified TTL.
    async fn set(&self, key: &str, value: V, ttl: Duration);

    /// Removes an entry. Returns true if an entry was removed.
    async fn delete(&self, key: &str) -> bool;
}

#[async_trait]
impl<V, T> TtlCache<V> for Arc<T>
where
    V: Send + 'static,
    T: TtlCache<V> + ?Sized,
{
    async fn get(&self, key: &str) -> Option<V> {
        (**self).get(key).await
    }

    async fn peek(&self, key: &str) -> Option<V> {
        (**self).peek(key).await
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) {
        (**self).set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> bool {
        (**self).delete(key).await
    }
}
