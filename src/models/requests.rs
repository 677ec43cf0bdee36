//! Request DTOs for the sensor server API
//!
//! Defines the structure of incoming query parameters.

use std::time::Duration;

use serde::Deserialize;

/// Query parameters for the temperature stream (GET /weather/temperature/stream)
///
/// # Fields
/// - `samples`: negative = no-op, zero = unbounded, positive = exactly that many readings
/// - `sample_rate`: readings per second; zero or negative streams as fast as the consumer accepts
#[derive(Debug, Clone, Deserialize)]
pub struct StreamRequest {
    /// Number of readings to stream
    #[serde(default)]
    pub samples: i32,
    /// Readings per second
    #[serde(default)]
    pub sample_rate: f64,
}

impl StreamRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !self.sample_rate.is_finite() {
            return Some(format!(
                "Sample rate must be a finite number, got {}",
                self.sample_rate
            ));
        }
        if self.sample_rate > 0.0 && Duration::try_from_secs_f64(1.0 / self.sample_rate).is_err() {
            return Some(format!(
                "Sample rate {} is too small to pace readings",
                self.sample_rate
            ));
        }
        None
    }

    /// Wait between successive reads, or None when the rate is unthrottled.
    pub fn sample_period(&self) -> Option<Duration> {
        if self.sample_rate > 0.0 {
            Duration::try_from_secs_f64(1.0 / self.sample_rate).ok()
        } else {
            None
        }
    }
}
