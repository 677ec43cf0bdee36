//! Error types for the sensor server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::stream::DeliveryError;

// == Zephyrus Error Enum ==
/// Unified error type for the sensor server.
#[derive(Error, Debug)]
pub enum ZephyrusError {
    /// Sensor hardware or driver failure
    #[error("Device error: {0}")]
    Device(String),

    /// Malformed request parameters, rejected before any work starts
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Delivery failed with a non-retryable transport condition
    #[error("Delivery failed: {0}")]
    Delivery(DeliveryError),

    /// Delivery kept failing transiently until the retry budget ran out
    #[error("Delivery failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: DeliveryError,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ZephyrusError {
    fn into_response(self) -> Response {
        let status = match &self {
            ZephyrusError::Device(_) => StatusCode::SERVICE_UNAVAILABLE,
            ZephyrusError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ZephyrusError::Delivery(_)
            | ZephyrusError::RetriesExhausted { .. }
            | ZephyrusError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the sensor server.
pub type Result<T> = std::result::Result<T, ZephyrusError>;
