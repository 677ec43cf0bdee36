//! API Handlers
//!
//! HTTP request handlers for each sensor server endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::cache::MemoryTtlCache;
use crate::config::Config;
use crate::device::{Sensor, SimulatedSensor, ThrottledSensor};
use crate::error::Result;
use crate::models::{
    ErrorResponse, HealthResponse, IdentifierResponse, StatsResponse, StatusResponse,
    StreamRequest, TemperatureResponse,
};
use crate::stream::{ChannelSink, RetryPolicy, StreamEvent, StreamSession};

/// Application state shared across all handlers.
///
/// The sensor is always the throttled proxy; `cache` is the same instance the proxy
/// reads through, kept here for statistics.
#[derive(Clone)]
pub struct AppState {
    /// Throttled sensor shared by every request and stream
    pub sensor: Arc<dyn Sensor>,
    /// Cache backing the throttled sensor
    pub cache: Arc<MemoryTtlCache<f64>>,
    /// Delivery retry policy applied to each stream
    pub retry_policy: RetryPolicy,
    /// Per-stream buffer size
    pub stream_buffer: usize,
    /// Wait for buffer space before a delivery fails
    pub stream_send_timeout: Duration,
    /// Flipped to true when the server starts shutting down
    shutdown: Arc<watch::Sender<bool>>,
}

impl AppState {
    /// Creates a new AppState wrapping `sensor` in a throttling proxy.
    pub fn new(sensor: impl Sensor + 'static, config: &Config) -> Self {
        let cache = Arc::new(MemoryTtlCache::new());
        let throttled = ThrottledSensor::with_cache(
            sensor,
            cache.clone(),
            Duration::from_millis(config.throttle_ttl_ms),
        );

        Self {
            sensor: Arc::new(throttled),
            cache,
            retry_policy: RetryPolicy::from_config(config),
            stream_buffer: config.stream_buffer.max(1),
            stream_send_timeout: Duration::from_millis(config.stream_send_timeout_ms),
            shutdown: Arc::new(watch::channel(false).0),
        }
    }

    /// Creates a new AppState from configuration, backed by a simulated sensor.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SimulatedSensor::new(config.device_identifier.clone()), config)
    }

    /// Stops every running stream session so open connections can drain.
    pub fn begin_shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

/// Handler for GET /health
///
/// Reports liveness of the server only, regardless of the device.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /device/identifier
pub async fn identifier_handler(State(state): State<AppState>) -> Result<Json<IdentifierResponse>> {
    let identifier = state.sensor.identifier().await?;
    Ok(Json(IdentifierResponse::new(identifier)))
}

/// Handler for GET /device/status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::new(state.sensor.status().await))
}

/// Handler for GET /weather/temperature
///
/// Reads through the throttled sensor, so bursts of requests share one device read.
pub async fn temperature_handler(
    State(state): State<AppState>,
) -> Result<Json<TemperatureResponse>> {
    let temperature = state.sensor.temperature().await?;
    Ok(Json(TemperatureResponse::new(temperature)))
}

/// Handler for GET /weather/temperature/stream
///
/// Streams readings as server-sent `reading` events. A fatal session error is reported
/// as a final `error` event before the stream closes. The session is aborted as soon as
/// the client disconnects or the server begins shutting down.
pub async fn stream_temperature_handler(
    State(state): State<AppState>,
    Query(req): Query<StreamRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    let mut session = StreamSession::new(&req, state.retry_policy.clone())?;
    let (tx, rx) = mpsc::channel(state.stream_buffer);
    let sensor = state.sensor.clone();
    let mut shutdown = state.shutdown.subscribe();
    let send_timeout = state.stream_send_timeout;

    tokio::spawn(async move {
        let mut sink = ChannelSink::new(tx.clone(), send_timeout);
        let stop = async {
            tokio::select! {
                _ = tx.closed() => {}
                _ = shutting_down(&mut shutdown) => {}
            }
        };
        let outcome = session.run_until(sensor.as_ref(), &mut sink, stop).await;

        if let Err(err) = outcome {
            // Waits behind any buffered readings; fails only once the consumer is gone
            let event = StreamEvent::Error(ErrorResponse::new(err.to_string()));
            let delivered = tokio::select! {
                sent = tx.send(event) => sent.is_ok(),
                _ = shutting_down(&mut shutdown) => false,
            };
            if !delivered {
                warn!(error = %err, "could not report stream failure to consumer");
            }
        }
    });

    let events = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (to_sse_event(event), rx))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Resolves once the server begins shutting down.
async fn shutting_down(shutdown: &mut watch::Receiver<bool>) {
    // An error means the sender is gone along with every AppState, which is shutdown as well
    let _ = shutdown.wait_for(|stopping| *stopping).await;
}

fn to_sse_event(event: StreamEvent) -> std::result::Result<Event, axum::Error> {
    match event {
        StreamEvent::Reading(reading) => Event::default().event("reading").json_data(reading),
        StreamEvent::Error(error) => Event::default().event("error").json_data(error),
    }
}

/// Handler for GET /stats
///
/// Returns statistics of the cache throttling device reads.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}
