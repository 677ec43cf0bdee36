//! Zephyrus - A temperature sensor server
//!
//! Serves readings from a temperature sensor over HTTP, throttling device reads through a
//! TTL cache and streaming paced readings with retry on transient delivery failures.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zephyrus::api::{create_router, AppState};
use zephyrus::Config;

/// Main entry point for the Zephyrus server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the sensor behind its throttling proxy and open it
/// 4. Start HTTP server on configured port
/// 5. On SIGINT/SIGTERM, shut down gracefully and close the sensor
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zephyrus=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Zephyrus sensor server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, device={}, throttle_ttl={}ms, max_retries={}, retry_delay={}ms",
        config.server_port,
        config.device_identifier,
        config.throttle_ttl_ms,
        config.stream_max_retries,
        config.stream_retry_delay_ms
    );

    let state = AppState::from_config(&config);
    state
        .sensor
        .open()
        .await
        .context("failed to open sensor device")?;
    info!("Sensor opened");

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await
        .context("server error")?;

    if let Err(err) = state.sensor.close().await {
        warn!("Failed to close sensor: {}", err);
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, stops running stream sessions so their connections can close.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    state.begin_shutdown();
    info!("Stream sessions stopped");
}
