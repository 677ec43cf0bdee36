//! Delivery Sinks
//!
//! The transport-facing side of a stream session: where readings go and how failures
//! to hand them over are classified.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::{ErrorResponse, TemperatureResponse};

// == Transport Code ==
/// Transport-level status attached to a failed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportCode {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    Internal,
    Unavailable,
}

// == Delivery Error ==
/// A failed attempt to hand one reading to the consumer.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{code:?}: {message}")]
pub struct DeliveryError {
    pub code: TransportCode,
    pub message: String,
}

impl DeliveryError {
    pub fn new(code: TransportCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

// == Reading Sink Trait ==
/// Accepts readings one at a time on behalf of a remote consumer.
#[async_trait]
pub trait ReadingSink: Send {
    /// Attempts to deliver a single reading.
    async fn send(&mut self, reading: &TemperatureResponse) -> Result<(), DeliveryError>;
}

// == Stream Event ==
/// Item carried from a running session to the transport.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Reading(TemperatureResponse),
    Error(ErrorResponse),
}

// == Channel Sink ==
/// Sink backed by a bounded mpsc channel.
///
/// Each send waits up to `send_timeout` for buffer space, so ordinary backpressure
/// just slows the session down. A consumer still behind after that is reported as
/// `ResourceExhausted`; a dropped receiver means the consumer went away and is
/// reported as `Cancelled`.
pub struct ChannelSink {
    tx: mpsc::Sender<StreamEvent>,
    send_timeout: Duration,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<StreamEvent>, send_timeout: Duration) -> Self {
        Self { tx, send_timeout }
    }
}

#[async_trait]
impl ReadingSink for ChannelSink {
    async fn send(&mut self, reading: &TemperatureResponse) -> Result<(), DeliveryError> {
        let permit = match tokio::time::timeout(self.send_timeout, self.tx.reserve()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => {
                return Err(DeliveryError::new(
                    TransportCode::Cancelled,
                    "consumer disconnected",
                ))
            }
            Err(_) => {
                return Err(DeliveryError::new(
                    TransportCode::ResourceExhausted,
                    "consumer buffer is full",
                ))
            }
        };

        permit.send(StreamEvent::Reading(reading.clone()));
        Ok(())
    }
}
