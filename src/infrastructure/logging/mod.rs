//! Event sinks for the remote log collaborator.
//!
//! Provides two [`crate::domain::events::EventSink`] implementations:
//! - [`ChannelEventSink`] - queues events for [`run_log_worker`], which posts them
//!   with [`RemoteLogClient`]
//! - [`NullEventSink`] - discards events when no collaborator is configured

mod channel_sink;
mod null_sink;
mod remote_client;
mod worker;

pub use channel_sink::ChannelEventSink;
pub use null_sink::NullEventSink;
pub use remote_client::{RemoteLogClient, RemoteLogPayload};
pub use worker::run_log_worker;
