//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`            - Short link redirect
//! - `GET  /health`            - Health check: registry, log queue
//! - `POST /shorturls`         - Create a short link
//! - `GET  /shorturls/{code}`  - Link statistics
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Single configured origin with credentials (optional)
//! - **Panic capture** - JSON 500 plus a `fatal` log event
//! - **Security headers** - `nosniff`, frame denial, `no-referrer`
//! - **Body limit** - Maximum JSON request size
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{security, tracing};
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::get;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Router settings taken from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Browser origin allowed with credentials; CORS is off when `None`.
    pub cors_allowed_origin: Option<HeaderValue>,
    pub max_body_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_allowed_origin: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Builds the application router with all routes and middleware, without
/// path normalization.
pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    let events = Arc::clone(&state.events);
    let clock = Arc::clone(state.registry.clock());

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .merge(api::routes::shorturl_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .layer(security::security_headers())
        .layer(security::catch_panic_layer(events, clock));

    if let Some(origin) = options.cors_allowed_origin.clone() {
        router = router.layer(security::cors_layer(origin));
    }

    router.layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before routing.
pub fn app_router(state: AppState, options: &RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, options))
}
