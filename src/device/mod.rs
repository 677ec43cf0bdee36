//! Device Module
//!
//! The sensor capability consumed by the rest of the server, plus the backends that provide it.
//!
//! # Backends
//! - `SimulatedSensor`: software sensor standing in for attached hardware
//! - `ThrottledSensor`: wraps any sensor and caches temperature reads for a fixed window

mod simulated;
mod throttle;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use simulated::SimulatedSensor;
pub use throttle::{ThrottledSensor, TEMPERATURE_CACHE_KEY, TEMPERATURE_CACHE_TTL};

// == Device Status ==
/// Reported state of a sensor device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Unknown,
    Opened,
    Closed,
    Error,
}

// == Sensor Trait ==
/// Operations a temperature sensor device supports.
///
/// Callers interact with devices through this contract without knowing how a given
/// backend talks to its hardware.
#[async_trait]
pub trait Sensor: Send + Sync {
    /// Opens a communication channel with the device.
    async fn open(&self) -> Result<()>;

    /// Closes the communication channel with the device.
    async fn close(&self) -> Result<()>;

    /// Unique identifier for the device.
    async fn identifier(&self) -> Result<String>;

    /// Current state of the device.
    async fn status(&self) -> DeviceStatus;

    /// Live temperature reading, in degrees Celsius.
    async fn temperature(&self) -> Result<f64>;
}

#[async_trait]
impl<T: Sensor + ?Sized> Sensor for std::sync::Arc<T> {
    async fn open(&self) -> Result<()> {
        (**self).open().await
    }

    async fn close(&self) -> Result<()> {
        (**self).close().await
    }

    async fn identifier(&self) -> Result<String> {
        (**self).identifier().await
    }

    async fn status(&self) -> DeviceStatus {
        (**self).status().await
    }

    async fn temperature(&self) -> Result<f64> {
        (**self).temperature().await
    }
}
