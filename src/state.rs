//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AnalyticsStore, RedirectResolver, ShortcodeRegistry};
use crate::domain::events::EventSink;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ShortcodeRegistry>,
    pub resolver: Arc<RedirectResolver>,
    pub analytics: Arc<AnalyticsStore>,
    pub events: Arc<dyn EventSink>,
    pub base_url: Arc<str>,
}

impl AppState {
    /// Wires the resolver and analytics projection around a shared registry.
    pub fn new(
        registry: Arc<ShortcodeRegistry>,
        events: Arc<dyn EventSink>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();

        Self {
            resolver: Arc::new(RedirectResolver::new(Arc::clone(&registry))),
            analytics: Arc::new(AnalyticsStore::new(Arc::clone(&registry))),
            registry,
            events,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Builds the public short link for `code`.
    pub fn short_link(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
