//! Click analytics: a read-only projection over link records.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::registry::ShortcodeRegistry;
use crate::domain::entities::{ClickEvent, LinkRecord};
use crate::domain::errors::LookupError;
use crate::domain::repositories::ClickWindow;

/// Summary of a short link and its click history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSummary {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Whether the link had expired when the summary was taken.
    pub expired: bool,
    /// Total clicks, independent of how many `clicks` are included.
    pub click_count: u64,
    pub clicks: Vec<ClickEvent>,
}

/// Read side of the click ledger.
///
/// Holds no state of its own; every summary is computed from the registry's
/// current record.
pub struct AnalyticsStore {
    registry: Arc<ShortcodeRegistry>,
}

impl AnalyticsStore {
    pub fn new(registry: Arc<ShortcodeRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the full click history for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if the code was never issued.
    pub async fn summarize(&self, code: &str) -> Result<LinkSummary, LookupError> {
        let record = self.registry.snapshot(code, ClickWindow::All).await?;
        debug_assert_eq!(record.click_count, record.clicks.len() as u64);
        Ok(self.project(record))
    }

    /// Returns the summary with at most `limit` clicks starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if the code was never issued.
    pub async fn summarize_page(
        &self,
        code: &str,
        offset: usize,
        limit: usize,
    ) -> Result<LinkSummary, LookupError> {
        let record = self
            .registry
            .snapshot(code, ClickWindow::Range { offset, limit })
            .await?;
        Ok(self.project(record))
    }

    fn project(&self, record: LinkRecord) -> LinkSummary {
        let expired = record.is_expired_at(self.registry.clock().now());

        LinkSummary {
            code: record.code,
            target_url: record.target_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            expired,
            click_count: record.click_count,
            clicks: record.clicks,
        }
    }
}
