//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check TTL, overwrite and delete semantics against a simulated clock.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::{CacheStore, ManualClock, MemoryTtlCache, TtlCache};

// == Strategies ==
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,32}".prop_map(|s| s)
}

fn ttl_strategy() -> impl Strategy<Value = Duration> {
    (1u64..10_000).prop_map(Duration::from_millis)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: i64, ttl: Duration },
    Get { key: String },
    Delete { key: String },
    Advance { by: Duration },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), any::<i64>(), prop_oneof![Just(Duration::ZERO), ttl_strategy()])
            .prop_map(|(key, value, ttl)| CacheOp::Set { key, value, ttl }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
        ttl_strategy().prop_map(|by| CacheOp::Advance { by }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A get strictly before now + ttl returns the value; any get at or after it is absent,
    // and stays absent on every later read.
    #[test]
    fn prop_ttl_window(
        key in valid_key_strategy(),
        value in any::<i64>(),
        ttl in ttl_strategy(),
        before_frac in 0.0f64..1.0,
    ) {
        let start = Instant::now();
        let mut store = CacheStore::new();
        store.set(key.clone(), value, ttl, start);

        let inside = start + ttl.mul_f64(before_frac);
        prop_assume!(inside < start + ttl);
        prop_assert_eq!(store.get(&key, inside), Some(value));

        let after = start + ttl + Duration::from_millis(1);
        prop_assert_eq!(store.get(&key, after), None);
        prop_assert_eq!(store.get(&key, after), None);
        prop_assert_eq!(store.get(&key, inside), None);
    }

    // Overwriting replaces the value and the expiry with those of the latest set.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in any::<i64>(),
        value2 in any::<i64>(),
        ttl1 in ttl_strategy(),
        ttl2 in ttl_strategy(),
    ) {
        let start = Instant::now();
        let mut store = CacheStore::new();

        store.set(key.clone(), value1, ttl1, start);
        store.set(key.clone(), value2, ttl2, start);

        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.get(&key, start), Some(value2));
        prop_assert_eq!(store.get(&key, start + ttl2), None);
    }

    // Deleting a present key reports true exactly once.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in any::<i64>()) {
        let now = Instant::now();
        let mut store = CacheStore::new();

        store.set(key.clone(), value, Duration::ZERO, now);
        prop_assert!(store.delete(&key));
        prop_assert!(!store.delete(&key));
        prop_assert_eq!(store.get(&key, now), None);
    }

    // The concurrent cache agrees with a simple model under any op sequence.
    #[test]
    fn prop_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let clock = Arc::new(ManualClock::new());
        let cache: MemoryTtlCache<i64> = MemoryTtlCache::with_clock(clock.clone());
        let mut model: HashMap<String, (i64, Option<Duration>)> = HashMap::new();
        let mut elapsed = Duration::ZERO;

        tokio_test::block_on(async {
            for op in ops {
                match op {
                    CacheOp::Set { key, value, ttl } => {
                        cache.set(&key, value, ttl).await;
                        let expiry = if ttl.is_zero() { None } else { Some(elapsed + ttl) };
                        model.insert(key, (value, expiry));
                    }
                    CacheOp::Get { key } => {
                        let expected = match model.get(&key) {
                            Some((value, None)) => Some(*value),
                            Some((value, Some(expiry))) if elapsed < *expiry => Some(*value),
                            Some(_) => {
                                model.remove(&key);
                                None
                            }
                            None => None,
                        };
                        prop_assert_eq!(cache.get(&key).await, expected);
                    }
                    CacheOp::Delete { key } => {
                        let expected = model.remove(&key).is_some();
                        prop_assert_eq!(cache.delete(&key).await, expected);
                    }
                    CacheOp::Advance { by } => {
                        clock.advance(by);
                        elapsed += by;
                    }
                }
            }

            prop_assert_eq!(cache.len().await, model.len());
            Ok(())
        })?;
    }
}
