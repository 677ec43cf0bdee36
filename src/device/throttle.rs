//! Throttled Sensor
//!
//! Sensor proxy that bounds how often the wrapped device is actually read by serving
//! temperature reads from a TTL cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{MemoryTtlCache, TtlCache};
use crate::device::{DeviceStatus, Sensor};
use crate::error::Result;

/// Cache key identifying temperature values from the device.
pub const TEMPERATURE_CACHE_KEY: &str = "sensor:temperature";

/// Default TTL for cached temperature values.
pub const TEMPERATURE_CACHE_TTL: Duration = Duration::from_millis(500);

// == Throttled Sensor ==
/// Wraps another `Sensor`, reading the real device at most once per TTL window.
///
/// Only `temperature` is cached; every other operation goes straight to the wrapped sensor.
/// A zero TTL turns caching off and every read goes to the device.
/// Concurrent misses are single-flighted: the first caller performs the device read and
/// the rest pick the cached value up once it lands.
pub struct ThrottledSensor<S, C = Arc<MemoryTtlCache<f64>>> {
    sensor: S,
    cache: C,
    ttl: Duration,
    /// Held across the miss-then-read sequence
    refresh: Mutex<()>,
}

impl<S: Sensor> ThrottledSensor<S> {
    /// Creates a throttled sensor with its own cache and the default TTL.
    pub fn new(sensor: S) -> Self {
        Self::with_cache(sensor, Arc::new(MemoryTtlCache::new()), TEMPERATURE_CACHE_TTL)
    }
}

impl<S, C> ThrottledSensor<S, C>
where
    S: Sensor,
    C: TtlCache<f64>,
{
    /// Creates a throttled sensor backed by `cache`, caching reads for `ttl`.
    pub fn with_cache(sensor: S, cache: C, ttl: Duration) -> Self {
        Self {
            sensor,
            cache,
            ttl,
            refresh: Mutex::new(()),
        }
    }

    /// The wrapped sensor.
    pub fn inner(&self) -> &S {
        &self.sensor
    }
}

#[async_trait]
impl<S, C> Sensor for ThrottledSensor<S, C>
where
    S: Sensor,
    C: TtlCache<f64>,
{
    async fn open(&self) -> Result<()> {
        self.sensor.open().await
    }

    async fn close(&self) -> Result<()> {
        self.sensor.close().await
    }

    async fn identifier(&self) -> Result<String> {
        self.sensor.identifier().await
    }

    async fn status(&self) -> DeviceStatus {
        self.sensor.status().await
    }

    async fn temperature(&self) -> Result<f64> {
        if self.ttl.is_zero() {
            return self.sensor.temperature().await;
        }

        if let Some(cached) = self.cache.get(TEMPERATURE_CACHE_KEY).await {
            return Ok(cached);
        }

        let _refresh = self.refresh.lock().await;

        // Another caller may have refreshed the value while we waited for the lock
        if let Some(cached) = self.cache.peek(TEMPERATURE_CACHE_KEY).await {
            return Ok(cached);
        }

        // A failed read is propagated as-is and never cached
        let temperature = self.sensor.temperature().await?;
        debug!(temperature, ttl_ms = self.ttl.as_millis() as u64, "refreshed cached temperature");
        self.cache
            .set(TEMPERATURE_CACHE_KEY, temperature, self.ttl)
            .await;

        Ok(temperature)
    }
}
