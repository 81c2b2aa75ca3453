//! Link record: one per short code ever issued by a registry.

use chrono::{DateTime, Utc};

use super::click::ClickEvent;

/// A short code mapped to its target URL.
///
/// Everything except the click ledger (`click_count` and `clicks`) is fixed at
/// creation. Records are never removed, so an expired code stays queryable and
/// is never handed out again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: u64,
    pub clicks: Vec<ClickEvent>,
}

impl LinkRecord {
    /// Creates a record with an empty click ledger.
    pub fn new(
        code: String,
        target_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        debug_assert!(expires_at > created_at, "expiry must follow creation");

        Self {
            code,
            target_url,
            created_at,
            expires_at,
            click_count: 0,
            clicks: Vec::new(),
        }
    }

    /// Returns true once `now` has reached the expiry instant.
    ///
    /// The boundary itself counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
