//! HTTP client for the remote log collaborator.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::events::{LogEvent, LogLevel};

/// Stack label sent with every event from this service.
const STACK: &str = "backend";

/// JSON body accepted by the log collaborator.
#[derive(Debug, Serialize)]
pub struct RemoteLogPayload<'a> {
    #[serde(rename = "logID", skip_serializing_if = "Option::is_none")]
    pub log_id: Option<&'a str>,
    pub stack: &'static str,
    pub level: LogLevel,
    pub package: &'static str,
    pub message: &'a str,
    pub ts: DateTime<Utc>,
}

/// Posts log events to the collaborator endpoint.
pub struct RemoteLogClient {
    http: reqwest::Client,
    endpoint: String,
    log_id: Option<String>,
}

impl RemoteLogClient {
    pub fn new(endpoint: String, log_id: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            log_id,
        }
    }

    /// Builds the wire payload for `event`.
    pub fn payload<'a>(&'a self, event: &'a LogEvent) -> RemoteLogPayload<'a> {
        RemoteLogPayload {
            log_id: self.log_id.as_deref(),
            stack: STACK,
            level: event.level,
            package: event.package,
            message: &event.message,
            ts: event.ts,
        }
    }

    /// Sends one event.
    ///
    /// # Errors
    ///
    /// Returns the transport error or a non-2xx status as a [`reqwest::Error`].
    /// Callers are expected to swallow it.
    pub async fn send(&self, event: &LogEvent) -> Result<(), reqwest::Error> {
        self.http
            .post(&self.endpoint)
            .json(&self.payload(event))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
