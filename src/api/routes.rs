//! API Routes
//!
//! Configures the Axum router with all sensor server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, identifier_handler, stats_handler, status_handler,
    stream_temperature_handler, temperature_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/device/identifier", get(identifier_handler))
        .route("/device/status", get(status_handler))
        .route("/weather/temperature", get(temperature_handler))
        .route("/weather/temperature/stream", get(stream_temperature_handler))
        .route("/stats", get(stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
