//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with its value and expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stored at `now`.
    ///
    /// A zero `ttl` produces an entry that never expires.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        let expires_at = if ttl.is_zero() { None } else { Some(now + ttl) };

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// An entry is only valid while its expiry is strictly in the future, so an
    /// entry read at exactly its expiry instant is already expired.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_no_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new(21.5, Duration::ZERO, now);

        assert_eq!(entry.value, 21.5);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(now + Duration::from_secs(86_400)));
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("reading", Duration::from_millis(500), now);

        assert_eq!(entry.expires_at, Some(now + Duration::from_millis(500)));
        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + Duration::from_millis(499)));
        assert!(entry.is_expired(now + Duration::from_millis(501)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("test", Duration::from_secs(1), now);

        // Expiry must be strictly in the future for the entry to be valid
        assert!(entry.is_expired(now + Duration::from_secs(1)));
    }
}
