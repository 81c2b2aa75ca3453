//! No-op sink used when no log collaborator is configured.

use crate::domain::events::{EventSink, LogEvent, SinkStatus};
use tracing::debug;

/// A sink that drops every event.
///
/// # Use Cases
///
/// - Development without a log collaborator
/// - Tests that do not assert on emitted events
pub struct NullEventSink;

impl NullEventSink {
    pub fn new() -> Self {
        debug!("Using NullEventSink (remote logging disabled)");
        Self
    }
}

impl Default for NullEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NullEventSink {
    fn record(&self, _event: LogEvent) {}

    fn status(&self) -> SinkStatus {
        SinkStatus::Disabled
    }
}
