//! Memory TTL Cache Module
//!
//! Thread-safe cache combining a `CacheStore` behind a single mutex with an injected clock.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::trace;

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock, TtlCache};

// == Memory TTL Cache ==
/// In-memory key-value cache with lazy TTL expiry, safe to share across tasks.
///
/// Every operation runs inside one critical section, so a `get` never observes a
/// partially applied `set`.
pub struct MemoryTtlCache<V> {
    store: Mutex<CacheStore<V>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone + Send> MemoryTtlCache<V> {
    /// Creates an empty cache bound to the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache that evaluates expiry against `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(CacheStore::new()),
            clock,
        }
    }

    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    /// Number of stored entries, including expired ones not yet touched.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

impl<V: Clone + Send> Default for MemoryTtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> TtlCache<V> for MemoryTtlCache<V>
where
    V: Clone + Send + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        let mut store = self.store.lock().await;
        let value = store.get(key, self.clock.now());
        trace!(key, hit = value.is_some(), "cache get");
        value
    }

    async fn peek(&self, key: &str) -> Option<V> {
        self.store.lock().await.peek(key, self.clock.now())
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) {
        let mut store = self.store.lock().await;
        store.set(key, value, ttl, self.clock.now());
        trace!(key, ttl_ms = ttl.as_millis() as u64, "cache set");
    }

    async fn delete(&self, key: &str) -> bool {
        self.store.lock().await.delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn manual_cache<V: Clone + Send>() -> (Arc<ManualClock>, MemoryTtlCache<V>) {
        let clock = Arc::new(ManualClock::new());
        let cache = MemoryTtlCache::with_clock(clock.clone());
        (clock, cache)
    }

    #[tokio::test]
    async fn test_get_before_and_after_ttl() {
        let (clock, cache) = manual_cache();

        cache.set("key", 1.25_f64, Duration::from_millis(500)).await;

        clock.advance(Duration::from_millis(499));
        assert_eq!(cache.get("key").await, Some(1.25));

        clock.advance(Duration::from_millis(2));
        assert_eq!(cache.get("key").await, None);
        assert_eq!(cache.get("key").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_zero_ttl_never_expires() {
        let (clock, cache) = manual_cache();

        cache.set("key", "forever".to_string(), Duration::ZERO).await;
        clock.advance(Duration::from_secs(10 * 365 * 24 * 3600));

        assert_eq!(cache.get("key").await.as_deref(), Some("forever"));
    }

    #[tokio::test]
    async fn test_overwrite_governed_by_latest_ttl() {
        let (clock, cache) = manual_cache();

        cache.set("key", 1_u8, Duration::from_secs(60)).await;
        cache.set("key", 2_u8, Duration::from_secs(1)).await;
        assert_eq!(cache.get("key").await, Some(2));

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get("key").await, None);
    }

    #[tokio::test]
    async fn test_delete() {
        let (_clock, cache) = manual_cache();

        cache.set("key", 1_u8, Duration::ZERO).await;
        assert!(cache.delete("key").await);
        assert!(!cache.delete("key").await);
        assert_eq!(cache.get("key").await, None);
    }

    #[tokio::test]
    async fn test_concurrent_writers_do_not_lose_entries() {
        let cache: Arc<MemoryTtlCache<usize>> = Arc::new(MemoryTtlCache::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache.set(&format!("key{}", i), i, Duration::ZERO).await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 32);
        for i in 0..32 {
            assert_eq!(cache.get(&format!("key{}", i)).await, Some(i));
        }
    }

    #[tokio::test]
    async fn test_stats_through_cache() {
        let (_clock, cache) = manual_cache();

        cache.set("key", 1_u8, Duration::ZERO).await;
        cache.get("key").await;
        cache.get("missing").await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
