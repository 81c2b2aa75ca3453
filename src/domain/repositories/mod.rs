//! Storage trait backing the shortcode registry.
//!
//! - [`LinkStore`] - Atomic insert-if-absent, per-record click append, snapshots
//! - Implementations live in `crate::infrastructure::persistence`
//! - A mock is generated via `mockall` for unit tests

pub mod link_store;

pub use link_store::{ClickOutcome, ClickWindow, InsertOutcome, LinkStore};

#[cfg(test)]
pub use link_store::MockLinkStore;
