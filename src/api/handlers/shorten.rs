//! Handler for short-link creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::shorten::{CreateShortUrlRequest, CreateShortUrlResponse};
use crate::domain::errors::CreationError;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::validate_target_url;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a",
///   "validity": 5,        // optional, minutes (default: 30)
///   "shortcode": "abcd"   // optional, 4-20 alphanumeric characters
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "http://localhost:4000/abcd",
///   "expiry": "2026-04-01T10:05:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL, validity or shortcode format.
/// Returns 409 Conflict if the requested shortcode is taken.
/// Returns 500 Internal Server Error if no free code could be generated.
pub async fn create_short_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateShortUrlResponse>), AppError> {
    let Json(payload) = payload?;

    let validity = match payload.validity_minutes() {
        Ok(validity) => validity,
        Err(e) => {
            // An invalid URL is reported ahead of an invalid validity.
            validate_target_url(&payload.url)
                .map_err(|url_err| CreationError::InvalidUrl(url_err.to_string()))?;
            return Err(e.into());
        }
    };

    let record = state
        .registry
        .create(&payload.url, validity, payload.shortcode.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateShortUrlResponse {
            short_link: state.short_link(&record.code),
            expiry: record.expires_at,
        }),
    ))
}
