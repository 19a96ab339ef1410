//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, log sink wiring, worker spawning, and Axum server lifecycle.

use crate::application::services::{EventReporter, LinkRegistry};
use crate::config::Config;
use crate::domain::log_event::Package;
use crate::domain::repositories::KeyValueStore;
use crate::infrastructure::log_sink::{HttpLogSink, LogSink, TracingSink};
use crate::infrastructure::persistence::{FileStore, MemoryStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Key-value store (file-backed when `DATA_DIR` is set, otherwise in memory)
/// - Log sink (HTTP when `LOG_SINK_URL` is set, otherwise local tracing)
/// - Background log worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The sink URL or stack is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    let sink = build_sink(&config)?;

    let (reporter, worker) =
        EventReporter::spawn(config.sink_stack()?, sink, config.log_queue_capacity);
    tracing::info!("Log worker started");

    let registry = LinkRegistry::new(store, config.storage_key.clone(), reporter.clone())
        .with_default_validity(config.default_validity_minutes);

    let state = AppState::new(Arc::new(registry), reporter.clone(), config.base_url.clone());
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");
    reporter.info(Package::Route, format!("Server listening on {addr}"));
    drop(reporter);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, flushing log queue");
    if let Err(e) = worker.await {
        tracing::warn!("Log worker ended abnormally: {}", e);
    }

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match &config.data_dir {
        Some(dir) => {
            let store = FileStore::open(dir)
                .await
                .with_context(|| format!("Failed to open data directory {}", dir.display()))?;
            tracing::info!("Storage: file ({})", store.root().display());
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATA_DIR not set, links are kept in memory only");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

fn build_sink(config: &Config) -> Result<Arc<dyn LogSink>> {
    if !config.is_remote_sink_enabled() {
        tracing::info!("Log sink disabled, events go to the local log");
        return Ok(Arc::new(TracingSink::new()));
    }

    let raw = config.log_sink_url.as_deref().unwrap_or_default();
    let endpoint = Url::parse(raw).with_context(|| format!("Invalid LOG_SINK_URL '{raw}'"))?;
    let sink = HttpLogSink::new(endpoint, config.log_sink_token.clone());
    tracing::info!("Log sink enabled ({})", sink.endpoint());
    Ok(Arc::new(sink))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
