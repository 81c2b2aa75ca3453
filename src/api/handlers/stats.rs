//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::json;

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves statistics for a specific short link.
///
/// # Endpoint
///
/// `GET /shorturls/{code}`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 1000)
///
/// Without either parameter the full click history is returned.
///
/// # Response
///
/// Returns link metadata, total click count and click records. Expired links
/// remain queryable.
///
/// # Errors
///
/// Returns 404 Not Found if the short code was never issued.
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::bad_request(e.body_text(), json!({ "kind": "invalid_query" })))?;

    if !params.is_requested() {
        let summary = state.analytics.summarize(&code).await?;
        return Ok(Json(StatsResponse::from_summary(summary, None)));
    }

    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({ "kind": "invalid_pagination" })))?;

    let summary = state
        .analytics
        .summarize_page(&code, offset, limit)
        .await?;
    let pagination = PaginationMeta::new(&params, summary.click_count);

    Ok(Json(StatsResponse::from_summary(summary, Some(pagination))))
}
