//! restash - A two-tier response cache service
//!
//! Serves a bounded TTL cache with LRU eviction over HTTP, with a
//! file-backed durable tier that survives restarts.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod persist;
mod tasks;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_report_task;

/// Main entry point for the restash cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the durable tier and create the cache
/// 4. Start the background metrics report task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restash=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting restash cache service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, default_ttl={}min, port={}, data_dir={:?}, report_interval={}s",
        config.capacity,
        config.default_ttl_minutes,
        config.server_port,
        config.data_dir,
        config.report_interval
    );

    let state = AppState::from_config(&config)
        .with_context(|| format!("could not open durable tier at {:?}", config.data_dir))?;
    info!("Cache initialized");

    let report_handle = spawn_report_task(state.cache.clone(), config.report_interval);
    info!("Metrics report task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(report_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the report task and allows graceful shutdown.
async fn shutdown_signal(report_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    report_handle.abort();
    warn!("Report task aborted");
}
