//! Response DTOs for the sensor server API
//!
//! Defines the structure of outgoing HTTP response bodies and stream events.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::device::DeviceStatus;

/// A single temperature reading (GET /weather/temperature, and each stream event)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureResponse {
    /// Temperature in degrees Celsius
    pub temperature: f64,
}

impl TemperatureResponse {
    pub fn new(temperature: f64) -> Self {
        Self { temperature }
    }
}

/// Response body for GET /device/identifier
#[derive(Debug, Clone, Serialize)]
pub struct IdentifierResponse {
    pub identifier: String,
}

impl IdentifierResponse {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

/// Response body for GET /device/status
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: DeviceStatus,
}

impl StatusResponse {
    pub fn new(status: DeviceStatus) -> Self {
        Self { status }
    }
}

/// Response body for the stats endpoint (GET /stats)
///
/// Reports on the cache protecting the device from excessive reads.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that found no cached value; callers sharing one refresh each count once
    pub misses: u64,
    /// Entries discarded because they had expired when read
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
///
/// Only reports liveness of the server, not of the attached device.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error body for failed requests and terminal stream events
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
