//! Repository trait for link records and their click ledgers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{ClickMeta, LinkRecord};
use crate::domain::errors::StoreError;

/// Result of an insert-if-absent attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A record with the same code already exists (live or expired).
    AlreadyExists,
}

/// Result of attempting to append a click to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was appended; `click_count` is the ledger size after the append.
    Recorded { target_url: String, click_count: u64 },
    /// The clock read at or past the record's expiry; nothing was appended.
    Expired { expires_at: DateTime<Utc> },
    NotFound,
}

/// Which part of a record's click history a snapshot should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickWindow {
    #[default]
    All,
    Range {
        offset: usize,
        limit: usize,
    },
}

/// Repository interface for the code → record map.
///
/// # Atomicity Contract
///
/// - `insert_if_absent` checks membership and inserts as one operation per code.
///   Two concurrent inserts of the same code must yield exactly one `Inserted`.
/// - `append_click` is atomic per record: the clock read, the expiry check, the
///   count increment and the event append happen in one critical section, so
///   once any caller has been told a record expired no later click lands on it.
///   Appends to different codes must not serialize behind one global lock.
/// - Records are never removed, so a code stays taken after it expires.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryLinkStore`] - sharded in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Inserts `record` unless its code is already present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    async fn insert_if_absent(&self, record: LinkRecord) -> Result<InsertOutcome, StoreError>;

    /// Returns a copy of the record with the requested window of clicks.
    ///
    /// `click_count` always reports the full ledger size, whatever the window.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    async fn snapshot(
        &self,
        code: &str,
        window: ClickWindow,
    ) -> Result<Option<LinkRecord>, StoreError>;

    /// Reads `clock` inside the record's critical section and, if that instant
    /// precedes the record's expiry, appends a click stamped with it.
    ///
    /// Clicks of one record are therefore appended in timestamp order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    async fn append_click(
        &self,
        code: &str,
        clock: Arc<dyn Clock>,
        meta: ClickMeta,
    ) -> Result<ClickOutcome, StoreError>;

    /// Number of records ever inserted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    async fn count(&self) -> Result<usize, StoreError>;
}
