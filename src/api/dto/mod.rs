//! Data Transfer Objects for API requests and responses.
//!
//! Request and response bodies use camelCase field names on the wire.

pub mod clicks;
pub mod health;
pub mod pagination;
pub mod shorten;
pub mod stats;
