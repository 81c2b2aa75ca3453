//! Infrastructure layer for storage and external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Link store implementations
//! - [`logging`] - Event sinks and the remote log collaborator client

pub mod logging;
pub mod persistence;
