//! Link store implementations.
//!
//! - [`InMemoryLinkStore`] - process-lifetime store on a sharded concurrent map

pub mod memory_link_store;

pub use memory_link_store::InMemoryLinkStore;
