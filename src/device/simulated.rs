//! Simulated Sensor
//!
//! Software-only sensor backend producing readings that drift slowly around a base
//! temperature. Used when no hardware is attached.

use std::f64::consts::TAU;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::device::{DeviceStatus, Sensor};
use crate::error::{Result, ZephyrusError};

/// Base temperature the simulated readings oscillate around, in Celsius.
const BASE_TEMPERATURE: f64 = 21.0;
/// Peak deviation from the base temperature.
const AMPLITUDE: f64 = 1.5;
/// Length of one full oscillation, in seconds.
const PERIOD_SECS: f64 = 600.0;

// == Simulated Sensor ==
/// Sensor that fabricates plausible temperature readings.
pub struct SimulatedSensor {
    /// Unique identifier, set by the operator
    identifier: String,
    status: Mutex<DeviceStatus>,
    started: Instant,
}

impl SimulatedSensor {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            status: Mutex::new(DeviceStatus::Unknown),
            started: Instant::now(),
        }
    }

    fn reading_at(&self, elapsed_secs: f64) -> f64 {
        let raw = BASE_TEMPERATURE + AMPLITUDE * (TAU * elapsed_secs / PERIOD_SECS).sin();
        // The device reports hundredths of a degree
        (raw * 100.0).round() / 100.0
    }
}

#[async_trait]
impl Sensor for SimulatedSensor {
    async fn open(&self) -> Result<()> {
        *self.status.lock().await = DeviceStatus::Opened;
        info!(identifier = %self.identifier, "simulated sensor opened");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        *self.status.lock().await = DeviceStatus::Closed;
        info!(identifier = %self.identifier, "simulated sensor closed");
        Ok(())
    }

    async fn identifier(&self) -> Result<String> {
        Ok(self.identifier.clone())
    }

    async fn status(&self) -> DeviceStatus {
        *self.status.lock().await
    }

    async fn temperature(&self) -> Result<f64> {
        let status = *self.status.lock().await;
        if status != DeviceStatus::Opened {
            return Err(ZephyrusError::Device(format!(
                "sensor '{}' is not open (status {:?})",
                self.identifier, status
            )));
        }

        Ok(self.reading_at(self.started.elapsed().as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lifecycle_status() {
        let sensor = SimulatedSensor::new("bench");
        assert_eq!(sensor.status().await, DeviceStatus::Unknown);

        sensor.open().await.unwrap();
        assert_eq!(sensor.status().await, DeviceStatus::Opened);

        sensor.close().await.unwrap();
        assert_eq!(sensor.status().await, DeviceStatus::Closed);
    }

    #[tokio::test]
    async fn test_read_requires_open() {
        let sensor = SimulatedSensor::new("bench");
        assert!(matches!(
            sensor.temperature().await,
            Err(ZephyrusError::Device(_))
        ));

        sensor.open().await.unwrap();
        let temperature = sensor.temperature().await.unwrap();
        assert!((BASE_TEMPERATURE - AMPLITUDE..=BASE_TEMPERATURE + AMPLITUDE).contains(&temperature));
    }

    #[test]
    fn test_reading_resolution() {
        let sensor = SimulatedSensor::new("bench");
        let reading = sensor.reading_at(37.0);
        assert_eq!((reading * 100.0).round() / 100.0, reading);
        assert_eq!(sensor.reading_at(0.0), BASE_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_identifier() {
        let sensor = SimulatedSensor::new("greenhouse");
        assert_eq!(sensor.identifier().await.unwrap(), "greenhouse");
    }
}
