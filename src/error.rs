//! HTTP error type and JSON error envelope.
//!
//! Every failing handler returns an [`AppError`], rendered as
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": { ... } } }
//! ```
//!
//! Domain errors convert into it via `From`, so handlers use `?` directly.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::domain::errors::{CreationError, LookupError, ResolutionError, StoreError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Gone { message: String, details: Value },
    #[error("{message}")]
    PayloadTooLarge { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Gone { .. } => StatusCode::GONE,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Gone { message, details } => ("gone", message, details),
            AppError::PayloadTooLarge { message, details } => {
                ("payload_too_large", message, details)
            }
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

fn storage_error(e: &StoreError) -> AppError {
    error!("Link store failure: {}", e);
    AppError::internal("Storage error", json!({ "kind": "storage" }))
}

impl From<CreationError> for AppError {
    fn from(e: CreationError) -> Self {
        let message = e.to_string();
        match e {
            CreationError::InvalidUrl(_) => {
                AppError::bad_request(message, json!({ "kind": "invalid_url" }))
            }
            CreationError::InvalidValidity(_) => {
                AppError::bad_request(message, json!({ "kind": "invalid_validity" }))
            }
            CreationError::InvalidShortcodeFormat(_) => {
                AppError::bad_request(message, json!({ "kind": "invalid_shortcode_format" }))
            }
            CreationError::ShortcodeTaken(code) => AppError::conflict(
                message,
                json!({ "kind": "shortcode_taken", "shortcode": code }),
            ),
            CreationError::AllocationExhausted { attempts } => AppError::internal(
                message,
                json!({ "kind": "allocation_exhausted", "attempts": attempts }),
            ),
            CreationError::Storage(e) => storage_error(&e),
        }
    }
}

impl From<ResolutionError> for AppError {
    fn from(e: ResolutionError) -> Self {
        let message = e.to_string();
        match e {
            ResolutionError::CodeNotFound(code) => {
                AppError::not_found(message, json!({ "kind": "not_found", "shortcode": code }))
            }
            ResolutionError::CodeExpired { code, expired_at } => AppError::gone(
                message,
                json!({ "kind": "expired", "shortcode": code, "expiredAt": expired_at }),
            ),
            ResolutionError::Storage(e) => storage_error(&e),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        let message = e.to_string();
        match e {
            LookupError::NotFound(code) => {
                AppError::not_found(message, json!({ "kind": "not_found", "shortcode": code }))
            }
            LookupError::Storage(e) => storage_error(&e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let details = json!({ "kind": "invalid_body", "reason": rejection.body_text() });

        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge {
                message: "Request body too large".to_string(),
                details,
            }
        } else {
            AppError::bad_request("Invalid JSON body", details)
        }
    }
}
