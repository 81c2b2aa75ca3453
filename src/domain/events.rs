//! Fire-and-forget log events for the remote log collaborator.
//!
//! Services report notable outcomes through an [`EventSink`]. Recording never
//! fails and never blocks: a sink that cannot deliver drops the event.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clock::Clock;

/// Severity of a log event, serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// A single event destined for the log collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: LogLevel,
    /// Component that emitted the event (e.g. `registry`, `resolver`, `boot`).
    pub package: &'static str,
    pub message: String,
    pub ts: DateTime<Utc>,
}

impl LogEvent {
    /// Builds an event stamped with the current time of `clock`.
    pub fn new(
        clock: &dyn Clock,
        level: LogLevel,
        package: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            package,
            message: message.into(),
            ts: clock.now(),
        }
    }

    pub fn info(clock: &dyn Clock, package: &'static str, message: impl Into<String>) -> Self {
        Self::new(clock, LogLevel::Info, package, message)
    }

    pub fn warn(clock: &dyn Clock, package: &'static str, message: impl Into<String>) -> Self {
        Self::new(clock, LogLevel::Warn, package, message)
    }

    pub fn error(clock: &dyn Clock, package: &'static str, message: impl Into<String>) -> Self {
        Self::new(clock, LogLevel::Error, package, message)
    }

    pub fn fatal(clock: &dyn Clock, package: &'static str, message: impl Into<String>) -> Self {
        Self::new(clock, LogLevel::Fatal, package, message)
    }
}

/// Delivery state of a sink, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkStatus {
    /// No collaborator configured; events are discarded.
    Disabled,
    /// Queue open with this many free slots.
    Open { available: usize },
    /// Delivery worker has stopped.
    Closed,
}

/// Capability for emitting events to the log collaborator.
///
/// # Implementations
///
/// - [`crate::infrastructure::logging::NullEventSink`] - discards everything
/// - [`crate::infrastructure::logging::ChannelEventSink`] - queues for a background worker
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    /// Records an event. Must not block and must not report failure.
    fn record(&self, event: LogEvent);

    fn status(&self) -> SinkStatus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_log_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LogLevel::Fatal).unwrap(), "\"fatal\"");
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
    }

    #[test]
    fn test_log_event_helpers_set_level() {
        let clock = ManualClock::new(Utc::now());
        assert_eq!(LogEvent::info(&clock, "boot", "up").level, LogLevel::Info);
        assert_eq!(LogEvent::warn(&clock, "resolver", "x").level, LogLevel::Warn);
        assert_eq!(LogEvent::error(&clock, "registry", "x").level, LogLevel::Error);

        let event = LogEvent::fatal(&clock, "middleware", "boom");
        assert_eq!(event.level, LogLevel::Fatal);
        assert_eq!(event.package, "middleware");
        assert_eq!(event.message, "boom");
    }

    #[test]
    fn test_log_event_is_stamped_by_the_given_clock() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        assert_eq!(LogEvent::info(&clock, "boot", "up").ts, start);

        clock.advance(Duration::minutes(90));
        assert_eq!(
            LogEvent::warn(&clock, "resolver", "late").ts,
            start + Duration::minutes(90)
        );
    }
}
