//! DTOs for per-link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use super::pagination::PaginationMeta;
use crate::application::services::LinkSummary;

/// Statistics for a single short link.
///
/// `clicks` holds every click unless the request was paginated, in which case
/// `pagination` describes the window and `clickCount` remains the total.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortcode: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub expired: bool,
    pub click_count: u64,
    pub clicks: Vec<ClickInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl StatsResponse {
    pub fn from_summary(summary: LinkSummary, pagination: Option<PaginationMeta>) -> Self {
        Self {
            shortcode: summary.code,
            target_url: summary.target_url,
            created_at: summary.created_at,
            expiry: summary.expires_at,
            expired: summary.expired,
            click_count: summary.click_count,
            clicks: summary.clicks.into_iter().map(ClickInfo::from).collect(),
            pagination,
        }
    }
}
