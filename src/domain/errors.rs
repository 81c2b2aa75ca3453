//! Typed failures for registry, resolver and analytics operations.
//!
//! None of these indicate a bug. Each is a normal outcome the caller can act
//! on; the HTTP layer maps them to status codes in [`crate::error`].

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure reported by a [`crate::domain::repositories::LinkStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("link store unavailable: {0}")]
    Unavailable(String),
}

/// Reasons a short link could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Validity must be a positive integer number of minutes: {0}")]
    InvalidValidity(String),

    #[error("Invalid shortcode format: {0}")]
    InvalidShortcodeFormat(String),

    #[error("Shortcode '{0}' is already taken")]
    ShortcodeTaken(String),

    #[error("No free shortcode found after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Reasons a short code could not be resolved to its target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Shortcode '{0}' not found")]
    CodeNotFound(String),

    #[error("Shortcode '{code}' expired at {expired_at}")]
    CodeExpired {
        code: String,
        expired_at: DateTime<Utc>,
    },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Failure of a read-only record lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Shortcode '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}
