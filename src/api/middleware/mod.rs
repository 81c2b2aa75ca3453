//! HTTP middleware for request processing and protection.
//!
//! Provides observability, browser-facing security and panic capture.

pub mod security;
pub mod tracing;
