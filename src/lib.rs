//! # TTL Shortener
//!
//! An expiring URL shortener with race-free click analytics, built with Axum.
//!
//! ## Architecture
//!
//! The crate keeps a clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link records, click events, errors, the
//!   clock and the store and event-sink traits
//! - **Application Layer** ([`application`]) - Shortcode registry, redirect
//!   resolver and analytics projection
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory link store and
//!   remote log delivery
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Generated or caller-chosen short codes, never reissued
//! - Per-link expiry (default 30 minutes); expired codes answer 410 Gone
//! - Click recording atomic with the expiry check
//! - Fire-and-forget remote logging through a bounded queue
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:4000"
//! export LOG_SINK_URL="http://logs.example.com/logs"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AnalyticsStore, LinkSummary, RedirectResolver, RegistrySettings, ShortcodeRegistry,
    };
    pub use crate::domain::clock::{Clock, ManualClock, SystemClock};
    pub use crate::domain::entities::{ClickEvent, ClickMeta, LinkRecord};
    pub use crate::domain::errors::{CreationError, LookupError, ResolutionError};
    pub use crate::error::AppError;
    pub use crate::routes::{RouterOptions, app_router, build_router};
    pub use crate::state::AppState;
}
