//! Core domain entities.
//!
//! - [`LinkRecord`] - A short code mapped to a target URL, with its click ledger
//! - [`ClickEvent`] - One successful redirect
//! - [`ClickMeta`] - Request metadata a click event is built from

pub mod click;
pub mod link;

pub use click::{ClickEvent, ClickMeta};
pub use link::LinkRecord;
