//! HTTP server initialization and runtime setup.
//!
//! Handles event sink selection, registry wiring, log worker spawning and the
//! Axum server lifecycle.

use crate::application::services::{RegistrySettings, ShortcodeRegistry};
use crate::config::Config;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::events::{EventSink, LogEvent};
use crate::infrastructure::logging::{
    ChannelEventSink, NullEventSink, RemoteLogClient, run_log_worker,
};
use crate::infrastructure::persistence::InMemoryLinkStore;
use crate::routes::{RouterOptions, app_router};
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use axum::http::HeaderValue;
use chrono::TimeDelta;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Time allowed for queued log events to drain after shutdown.
const LOG_FLUSH_TIMEOUT_SECS: u64 = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Remote log sink and worker (or NullEventSink fallback)
/// - In-memory link store and shortcode registry
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - A configured value cannot be applied
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (events, log_worker) = build_event_sink(&config);

    let settings = RegistrySettings {
        default_validity: TimeDelta::try_minutes(config.default_validity_minutes)
            .context("DEFAULT_VALIDITY_MINUTES is out of range")?,
        max_allocation_attempts: config.allocation_attempts,
        ..RegistrySettings::default()
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let registry = Arc::new(ShortcodeRegistry::new(
        Arc::new(InMemoryLinkStore::new()),
        Arc::new(RandomCodeGenerator::new(config.shortcode_length)),
        Arc::clone(&clock),
        Arc::clone(&events),
        settings,
    ));
    tracing::info!("Shortcode registry ready (in-memory store)");

    let options = RouterOptions {
        cors_allowed_origin: config
            .cors_allowed_origin
            .as_deref()
            .map(HeaderValue::from_str)
            .transpose()
            .context("CORS_ALLOWED_ORIGIN is not a valid header value")?,
        max_body_bytes: config.max_body_bytes,
    };

    let state = AppState::new(registry, Arc::clone(&events), config.base_url.clone());
    let app = app_router(state, &options);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");
    events.record(LogEvent::info(
        clock.as_ref(),
        "boot",
        format!("Service started on {addr}"),
    ));

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    drop(events);
    if let Some(worker) = log_worker {
        match tokio::time::timeout(Duration::from_secs(LOG_FLUSH_TIMEOUT_SECS), worker).await {
            Ok(_) => tracing::info!("Log queue flushed"),
            Err(_) => tracing::warn!(
                "Log queue not drained after {} seconds, dropping remaining events",
                LOG_FLUSH_TIMEOUT_SECS
            ),
        }
    }

    Ok(())
}

/// Selects the remote log sink, spawning its worker when a URL is configured.
fn build_event_sink(config: &Config) -> (Arc<dyn EventSink>, Option<JoinHandle<()>>) {
    match &config.log_sink_url {
        Some(url) => {
            let (tx, rx) = mpsc::channel(config.log_queue_capacity);
            let client = RemoteLogClient::new(url.clone(), config.log_id.clone());
            let worker = tokio::spawn(run_log_worker(rx, client));
            tracing::info!("Remote log worker started");

            (Arc::new(ChannelEventSink::new(tx)), Some(worker))
        }
        None => {
            tracing::info!("Remote logging disabled (NullEventSink)");
            (Arc::new(NullEventSink::new()), None)
        }
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
