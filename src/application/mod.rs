//! Application layer services implementing the shortcode lifecycle.
//!
//! # Available Services
//!
//! - [`services::registry::ShortcodeRegistry`] - Code allocation and record ownership
//! - [`services::resolver::RedirectResolver`] - Expiry-checked resolution with click recording
//! - [`services::analytics::AnalyticsStore`] - Read-only click history summaries

pub mod services;
