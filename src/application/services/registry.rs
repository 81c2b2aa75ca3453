//! Shortcode registry: the authoritative code → record map.

use chrono::TimeDelta;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::clock::Clock;
use crate::domain::entities::{ClickMeta, LinkRecord};
use crate::domain::errors::{CreationError, LookupError, StoreError};
use crate::domain::events::{EventSink, LogEvent};
use crate::domain::repositories::{ClickOutcome, ClickWindow, InsertOutcome, LinkStore};
use crate::utils::code_generator::{ShortcodeGenerator, validate_code};
use crate::utils::url_validator::validate_target_url;

/// Validity applied when a caller does not supply one.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

/// Attempts made to find a free generated code before giving up.
pub const DEFAULT_ALLOCATION_ATTEMPTS: usize = 10;

/// Codes shadowed by fixed routes; they are never issued.
pub const RESERVED_CODES: &[&str] = &["health", "shorturls"];

/// Tunables injected at construction time.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub default_validity: TimeDelta,
    pub max_allocation_attempts: usize,
    pub reserved_codes: Vec<String>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            default_validity: TimeDelta::minutes(DEFAULT_VALIDITY_MINUTES),
            max_allocation_attempts: DEFAULT_ALLOCATION_ATTEMPTS,
            reserved_codes: RESERVED_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Owns every link record and the uniqueness of their codes.
///
/// Records are created here and never removed. The only mutation after
/// creation is the click append performed on behalf of
/// [`super::RedirectResolver`].
pub struct ShortcodeRegistry {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn ShortcodeGenerator>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
    settings: RegistrySettings,
}

impl ShortcodeRegistry {
    pub fn new(
        store: Arc<dyn LinkStore>,
        generator: Arc<dyn ShortcodeGenerator>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
        settings: RegistrySettings,
    ) -> Self {
        Self {
            store,
            generator,
            clock,
            events,
            settings,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `target_url` - Absolute URL to redirect to
    /// - `validity_minutes` - Optional lifetime; the configured default otherwise
    /// - `requested_code` - Optional caller-chosen code
    ///
    /// # Code Allocation
    ///
    /// - A requested code is validated, then claimed with a single
    ///   insert-if-absent so two concurrent claims cannot both succeed
    /// - Otherwise generated codes are tried until one inserts, up to
    ///   `max_allocation_attempts`
    ///
    /// # Errors
    ///
    /// Checks run in this order:
    /// - [`CreationError::InvalidUrl`] if the target is not an absolute URL
    /// - [`CreationError::InvalidValidity`] if validity is not a positive number of minutes
    /// - [`CreationError::InvalidShortcodeFormat`] if the requested code is malformed
    /// - [`CreationError::ShortcodeTaken`] if the requested code exists or is reserved
    /// - [`CreationError::AllocationExhausted`] if every generated candidate collided
    pub async fn create(
        &self,
        target_url: &str,
        validity_minutes: Option<i64>,
        requested_code: Option<&str>,
    ) -> Result<LinkRecord, CreationError> {
        let target_url = validate_target_url(target_url)
            .map_err(|e| CreationError::InvalidUrl(e.to_string()))?;

        let validity = self.validity(validity_minutes)?;

        let created_at = self.clock.now();
        let expires_at = created_at.checked_add_signed(validity).ok_or_else(|| {
            CreationError::InvalidValidity("expiry is out of the representable range".to_string())
        })?;

        let record = match requested_code {
            Some(candidate) => {
                let code = validate_code(candidate)?;
                self.claim(LinkRecord::new(code, target_url, created_at, expires_at))
                    .await?
            }
            None => {
                self.allocate(|code| {
                    LinkRecord::new(code, target_url.clone(), created_at, expires_at)
                })
                .await?
            }
        };

        info!(
            code = %record.code,
            expires_at = %record.expires_at,
            "Short link created"
        );
        self.events.record(LogEvent::info(
            self.clock.as_ref(),
            "registry",
            format!("Created {} -> {}", record.code, record.target_url),
        ));

        Ok(record)
    }

    /// Retrieves a record with its full click history.
    ///
    /// Does not interpret expiry: expired records are returned like live ones.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if the code was never issued.
    pub async fn lookup(&self, code: &str) -> Result<LinkRecord, LookupError> {
        self.snapshot(code, ClickWindow::All).await
    }

    /// Number of records ever created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    pub async fn len(&self) -> Result<usize, StoreError> {
        self.store.count().await
    }

    /// Returns true if no record has been created yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached.
    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len().await? == 0)
    }

    pub(crate) async fn snapshot(
        &self,
        code: &str,
        window: ClickWindow,
    ) -> Result<LinkRecord, LookupError> {
        self.store
            .snapshot(code, window)
            .await?
            .ok_or_else(|| LookupError::NotFound(code.to_string()))
    }

    /// Records a click stamped by the registry clock, if the record is live.
    pub(crate) async fn append_click(
        &self,
        code: &str,
        meta: ClickMeta,
    ) -> Result<ClickOutcome, StoreError> {
        self.store
            .append_click(code, Arc::clone(&self.clock), meta)
            .await
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub(crate) fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }

    fn validity(&self, minutes: Option<i64>) -> Result<TimeDelta, CreationError> {
        match minutes {
            None => Ok(self.settings.default_validity),
            Some(m) if m > 0 => TimeDelta::try_minutes(m).ok_or_else(|| {
                CreationError::InvalidValidity(format!("{} minutes is too large", m))
            }),
            Some(m) => Err(CreationError::InvalidValidity(format!(
                "got {}, expected a value greater than 0",
                m
            ))),
        }
    }

    fn is_reserved(&self, code: &str) -> bool {
        self.settings.reserved_codes.iter().any(|r| r == code)
    }

    async fn claim(&self, record: LinkRecord) -> Result<LinkRecord, CreationError> {
        if self.is_reserved(&record.code) {
            return Err(CreationError::ShortcodeTaken(record.code));
        }

        match self.store.insert_if_absent(record.clone()).await? {
            InsertOutcome::Inserted => Ok(record),
            InsertOutcome::AlreadyExists => {
                info!(code = %record.code, "Requested shortcode already taken");
                Err(CreationError::ShortcodeTaken(record.code))
            }
        }
    }

    async fn allocate<F>(&self, build: F) -> Result<LinkRecord, CreationError>
    where
        F: Fn(String) -> LinkRecord,
    {
        let attempts = self.settings.max_allocation_attempts;

        for attempt in 1..=attempts {
            let code = self.generator.allocate();
            if self.is_reserved(&code) {
                continue;
            }

            let record = build(code);
            match self.store.insert_if_absent(record.clone()).await? {
                InsertOutcome::Inserted => return Ok(record),
                InsertOutcome::AlreadyExists => {
                    debug!(code = %record.code, attempt, "Generated shortcode collided");
                }
            }
        }

        self.events.record(LogEvent::error(
            self.clock.as_ref(),
            "registry",
            format!("Shortcode allocation exhausted after {} attempts", attempts),
        ));

        Err(CreationError::AllocationExhausted { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::events::{LogLevel, MockEventSink};
    use crate::domain::repositories::MockLinkStore;
    use crate::infrastructure::logging::NullEventSink;
    use crate::infrastructure::persistence::InMemoryLinkStore;
    use crate::utils::code_generator::{MockShortcodeGenerator, RandomCodeGenerator};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::collections::HashSet;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap()
    }

    fn registry_with(
        store: Arc<dyn LinkStore>,
        generator: Arc<dyn ShortcodeGenerator>,
    ) -> ShortcodeRegistry {
        ShortcodeRegistry::new(
            store,
            generator,
            Arc::new(ManualClock::new(start())),
            Arc::new(NullEventSink::new()),
            RegistrySettings::default(),
        )
    }

    fn memory_registry() -> ShortcodeRegistry {
        registry_with(
            Arc::new(InMemoryLinkStore::new()),
            Arc::new(RandomCodeGenerator::default()),
        )
    }

    #[tokio::test]
    async fn test_create_with_default_validity() {
        let registry = memory_registry();

        let record = registry
            .create("https://example.com/a", None, None)
            .await
            .unwrap();

        assert_eq!(record.created_at, start());
        assert_eq!(record.expires_at - record.created_at, Duration::minutes(30));
        assert_eq!(record.code.len(), 6);
        assert_eq!(record.click_count, 0);
        assert!(record.clicks.is_empty());
    }

    #[tokio::test]
    async fn test_create_with_supplied_validity_and_code() {
        let registry = memory_registry();

        let record = registry
            .create("https://example.com/a", Some(5), Some("abcd"))
            .await
            .unwrap();

        assert_eq!(record.code, "abcd");
        assert_eq!(record.target_url, "https://example.com/a");
        assert_eq!(record.expires_at, start() + Duration::minutes(5));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url_without_inserting() {
        let registry = memory_registry();

        let err = registry.create("not-a-url", None, None).await.unwrap_err();

        assert!(matches!(err, CreationError::InvalidUrl(_)));
        assert_eq!(registry.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_validity() {
        let registry = memory_registry();

        for validity in [0, -1, i64::MIN] {
            let err = registry
                .create("https://example.com", Some(validity), None)
                .await
                .unwrap_err();
            assert!(matches!(err, CreationError::InvalidValidity(_)));
        }
        assert!(registry.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_overflowing_validity() {
        let registry = memory_registry();

        let err = registry
            .create("https://example.com", Some(i64::MAX), None)
            .await
            .unwrap_err();

        assert!(matches!(err, CreationError::InvalidValidity(_)));
    }

    #[tokio::test]
    async fn test_url_is_checked_before_validity_and_code() {
        let registry = memory_registry();

        let err = registry
            .create("not-a-url", Some(0), Some("ab"))
            .await
            .unwrap_err();
        assert!(matches!(err, CreationError::InvalidUrl(_)));

        let err = registry
            .create("https://example.com", Some(0), Some("ab"))
            .await
            .unwrap_err();
        assert!(matches!(err, CreationError::InvalidValidity(_)));
    }

    #[tokio::test]
    async fn test_requested_code_format_and_collision() {
        let registry = memory_registry();

        let err = registry
            .create("https://example.com", None, Some("ab"))
            .await
            .unwrap_err();
        assert!(matches!(err, CreationError::InvalidShortcodeFormat(_)));

        registry
            .create("https://example.com", None, Some("validCode123"))
            .await
            .unwrap();

        let err = registry
            .create("https://other.example.com", None, Some("validCode123"))
            .await
            .unwrap_err();
        assert_eq!(err, CreationError::ShortcodeTaken("validCode123".to_string()));
        assert_eq!(registry.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_expired_code_is_never_reissued() {
        let clock = ManualClock::new(start());
        let registry = ShortcodeRegistry::new(
            Arc::new(InMemoryLinkStore::new()),
            Arc::new(RandomCodeGenerator::default()),
            Arc::new(clock.clone()),
            Arc::new(NullEventSink::new()),
            RegistrySettings::default(),
        );

        registry
            .create("https://example.com", Some(1), Some("oldcode"))
            .await
            .unwrap();
        clock.advance(Duration::hours(24));

        let err = registry
            .create("https://example.com/new", None, Some("oldcode"))
            .await
            .unwrap_err();
        assert!(matches!(err, CreationError::ShortcodeTaken(_)));
    }

    #[tokio::test]
    async fn test_reserved_codes_count_as_taken() {
        let registry = memory_registry();

        let err = registry
            .create("https://example.com", None, Some("health"))
            .await
            .unwrap_err();

        assert_eq!(err, CreationError::ShortcodeTaken("health".to_string()));
    }

    #[tokio::test]
    async fn test_allocation_retries_after_collision() {
        let store = Arc::new(InMemoryLinkStore::new());
        let mut generator = MockShortcodeGenerator::new();
        let mut seq = mockall::Sequence::new();
        generator
            .expect_allocate()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|| "dupe12".to_string());
        generator
            .expect_allocate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "fresh1".to_string());

        let registry = registry_with(store, Arc::new(generator));

        let first = registry.create("https://a.example.com", None, None).await.unwrap();
        let second = registry.create("https://b.example.com", None, None).await.unwrap();

        assert_eq!(first.code, "dupe12");
        assert_eq!(second.code, "fresh1");
    }

    #[tokio::test]
    async fn test_allocation_exhausted_is_reported() {
        let mut generator = MockShortcodeGenerator::new();
        generator
            .expect_allocate()
            .returning(|| "always".to_string());

        let mut store = MockLinkStore::new();
        store
            .expect_insert_if_absent()
            .times(DEFAULT_ALLOCATION_ATTEMPTS)
            .returning(|_| Ok(InsertOutcome::AlreadyExists));

        let mut events = MockEventSink::new();
        events
            .expect_record()
            .withf(|event| event.level == LogLevel::Error && event.package == "registry")
            .times(1)
            .return_const(());

        let registry = ShortcodeRegistry::new(
            Arc::new(store),
            Arc::new(generator),
            Arc::new(ManualClock::new(start())),
            Arc::new(events),
            RegistrySettings::default(),
        );

        let err = registry
            .create("https://example.com", None, None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CreationError::AllocationExhausted {
                attempts: DEFAULT_ALLOCATION_ATTEMPTS
            }
        );
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_storage_error() {
        let mut store = MockLinkStore::new();
        store
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("down".to_string())));

        let registry = registry_with(Arc::new(store), Arc::new(RandomCodeGenerator::default()));

        let err = registry
            .create("https://example.com", None, Some("abcd"))
            .await
            .unwrap_err();

        assert!(matches!(err, CreationError::Storage(_)));
    }

    #[tokio::test]
    async fn test_successful_create_emits_info_event() {
        let mut events = MockEventSink::new();
        events
            .expect_record()
            .withf(|event| {
                event.level == LogLevel::Info && event.message.contains("abcd")
            })
            .times(1)
            .return_const(());

        let registry = ShortcodeRegistry::new(
            Arc::new(InMemoryLinkStore::new()),
            Arc::new(RandomCodeGenerator::default()),
            Arc::new(ManualClock::new(start())),
            Arc::new(events),
            RegistrySettings::default(),
        );

        registry
            .create("https://example.com", None, Some("abcd"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_lookup_returns_record_or_not_found() {
        let registry = memory_registry();
        registry
            .create("https://example.com", None, Some("abcd"))
            .await
            .unwrap();

        let record = registry.lookup("abcd").await.unwrap();
        assert_eq!(record.target_url, "https://example.com");

        let err = registry.lookup("zzzz").await.unwrap_err();
        assert_eq!(err, LookupError::NotFound("zzzz".to_string()));
    }

    #[tokio::test]
    async fn test_generated_and_requested_codes_are_unique() {
        let registry = memory_registry();
        let mut codes = HashSet::new();

        for i in 0..200 {
            let requested = format!("custom{i}");
            let custom = registry
                .create("https://example.com", None, Some(&requested))
                .await
                .unwrap();
            let generated = registry.create("https://example.com", None, None).await.unwrap();

            assert!(codes.insert(custom.code));
            assert!(codes.insert(generated.code));
        }

        assert_eq!(registry.len().await.unwrap(), 400);
    }
}
