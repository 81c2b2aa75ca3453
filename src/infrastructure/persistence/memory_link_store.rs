//! In-memory implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{ClickEvent, ClickMeta, LinkRecord};
use crate::domain::errors::StoreError;
use crate::domain::repositories::{ClickOutcome, ClickWindow, InsertOutcome, LinkStore};

/// Immutable part of a record plus its lock-protected click ledger.
#[derive(Debug)]
struct StoredLink {
    code: String,
    target_url: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    ledger: Mutex<ClickLedger>,
}

#[derive(Debug, Default)]
struct ClickLedger {
    count: u64,
    clicks: Vec<ClickEvent>,
}

impl StoredLink {
    fn from_record(record: LinkRecord) -> Self {
        Self {
            code: record.code,
            target_url: record.target_url,
            created_at: record.created_at,
            expires_at: record.expires_at,
            ledger: Mutex::new(ClickLedger {
                count: record.click_count,
                clicks: record.clicks,
            }),
        }
    }

    fn snapshot(&self, window: ClickWindow) -> LinkRecord {
        let ledger = self.ledger.lock();

        let clicks = match window {
            ClickWindow::All => ledger.clicks.clone(),
            ClickWindow::Range { offset, limit } => ledger
                .clicks
                .iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
        };

        LinkRecord {
            code: self.code.clone(),
            target_url: self.target_url.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            click_count: ledger.count,
            clicks,
        }
    }
}

/// Link store kept in process memory.
///
/// The map is sharded, so inserts of different codes rarely contend, and each
/// record carries its own ledger mutex. Map shard guards are released before a
/// ledger lock is taken, so a busy code never blocks lookups of its shard
/// neighbours.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: DashMap<String, Arc<StoredLink>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, code: &str) -> Option<Arc<StoredLink>> {
        self.links.get(code).map(|entry| Arc::clone(entry.value()))
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert_if_absent(&self, record: LinkRecord) -> Result<InsertOutcome, StoreError> {
        match self.links.entry(record.code.clone()) {
            Entry::Occupied(_) => Ok(InsertOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(StoredLink::from_record(record)));
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn snapshot(
        &self,
        code: &str,
        window: ClickWindow,
    ) -> Result<Option<LinkRecord>, StoreError> {
        Ok(self.get(code).map(|link| link.snapshot(window)))
    }

    async fn append_click(
        &self,
        code: &str,
        clock: Arc<dyn Clock>,
        meta: ClickMeta,
    ) -> Result<ClickOutcome, StoreError> {
        let Some(link) = self.get(code) else {
            return Ok(ClickOutcome::NotFound);
        };

        let mut ledger = link.ledger.lock();
        let now = clock.now();
        if now >= link.expires_at {
            return Ok(ClickOutcome::Expired {
                expires_at: link.expires_at,
            });
        }

        ledger.clicks.push(ClickEvent::from_meta(now, meta));
        ledger.count += 1;
        debug_assert_eq!(ledger.count, ledger.clicks.len() as u64);

        Ok(ClickOutcome::Recorded {
            target_url: link.target_url.clone(),
            click_count: ledger.count,
        })
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.links.len())
    }
}
