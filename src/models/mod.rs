//! Request and Response models for the sensor server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query parameters and serializing response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::StreamRequest;
pub use responses::{
    ErrorResponse, HealthResponse, IdentifierResponse, StatsResponse, StatusResponse,
    TemperatureResponse,
};
