//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};

use crate::domain::entities::ClickMeta;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Capture `Referer` and `User-Agent` headers as click metadata
/// 2. Resolve the code; the resolver checks expiry and records the click atomically
/// 3. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the short code was never issued.
/// Returns 410 Gone if the short code has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let meta = ClickMeta::new(
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    let target_url = state.resolver.resolve(&code, meta).await?;

    Ok(Redirect::temporary(&target_url))
}
