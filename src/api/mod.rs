//! API Module
//!
//! HTTP handlers and routing for the sensor server.
//!
//! # Endpoints
//! - `GET /health` - Liveness check
//! - `GET /device/identifier` - Device identifier
//! - `GET /device/status` - Device status
//! - `GET /weather/temperature` - Single (throttled) temperature reading
//! - `GET /weather/temperature/stream` - Server-sent stream of readings
//! - `GET /stats` - Throttle cache statistics

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
