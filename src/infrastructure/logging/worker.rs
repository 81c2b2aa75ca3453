//! Background delivery of queued log events.

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::remote_client::RemoteLogClient;
use crate::domain::events::LogEvent;

/// Drains the event queue, posting each event to the collaborator.
///
/// Delivery failures are logged at `debug` and otherwise ignored. The worker
/// exits once every sender has been dropped.
pub async fn run_log_worker(mut rx: mpsc::Receiver<LogEvent>, client: RemoteLogClient) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = client.send(&event).await {
            debug!(package = event.package, "Failed to deliver log event: {}", e);
        }
    }

    info!("Log worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::SystemClock;

    #[tokio::test]
    async fn test_worker_survives_delivery_failures_and_exits_on_close() {
        let (tx, rx) = mpsc::channel(4);
        let client = RemoteLogClient::new("http://127.0.0.1:1/ingest".to_string(), None);
        let worker = tokio::spawn(run_log_worker(rx, client));

        tx.send(LogEvent::info(&SystemClock, "boot", "one")).await.unwrap();
        tx.send(LogEvent::warn(&SystemClock, "boot", "two")).await.unwrap();
        drop(tx);

        worker.await.unwrap();
    }
}
