//! Bounded-queue sink feeding the background log worker.

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::events::{EventSink, LogEvent, SinkStatus};

/// Queues events for [`super::run_log_worker`].
///
/// `record` uses `try_send`: when the queue is full or the worker has stopped
/// the event is dropped, so request handling never waits on the collaborator.
#[derive(Clone)]
pub struct ChannelEventSink {
    sender: mpsc::Sender<LogEvent>,
}

impl ChannelEventSink {
    pub fn new(sender: mpsc::Sender<LogEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelEventSink {
    fn record(&self, event: LogEvent) {
        if let Err(e) = self.sender.try_send(event) {
            debug!("Dropping log event: {}", e);
        }
    }

    fn status(&self) -> SinkStatus {
        if self.sender.is_closed() {
            SinkStatus::Closed
        } else {
            SinkStatus::Open {
                available: self.sender.capacity(),
            }
        }
    }
}
