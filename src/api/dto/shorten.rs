//! DTOs for the short-link creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::CreationError;

/// Floats at or above this magnitude are not exactly representable as whole
/// minutes and stay rejected.
const MAX_EXACT_FLOAT_MINUTES: f64 = 9.0e15;

/// Request to create a short link.
///
/// Missing fields deserialize to their empty form so that the registry,
/// not the JSON extractor, reports what is wrong with the request.
#[derive(Debug, Deserialize)]
pub struct CreateShortUrlRequest {
    #[serde(default)]
    pub url: String,

    /// Lifetime in whole minutes. Kept as raw JSON so that non-integers are
    /// reported as an invalid validity rather than a malformed body.
    #[serde(default)]
    pub validity: Option<Value>,

    #[serde(default)]
    pub shortcode: Option<String>,
}

impl CreateShortUrlRequest {
    /// Returns the validity as whole minutes, `None` when absent or null.
    ///
    /// Integral JSON numbers written in float form (`5.0`, `1e1`) count as
    /// whole minutes.
    ///
    /// # Errors
    ///
    /// Returns [`CreationError::InvalidValidity`] if the value is not an integer.
    pub fn validity_minutes(&self) -> Result<Option<i64>, CreationError> {
        match &self.validity {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_i64()
                .or_else(|| {
                    value
                        .as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT_MINUTES)
                        .map(|f| f as i64)
                })
                .map(Some)
                .ok_or_else(|| CreationError::InvalidValidity(value.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortUrlResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}
