//! Domain layer containing the link model and the seams the services depend on.
//!
//! Nothing in here touches HTTP or a concrete backend. The services in
//! [`crate::application::services`] are written against these types only.
//!
//! # Architecture
//!
//! - [`entities`] - Link records and click events
//! - [`repositories`] - The [`repositories::LinkStore`] trait backing the registry
//! - [`clock`] - Injectable time source used for expiry decisions
//! - [`events`] - Fire-and-forget log sink capability
//! - [`errors`] - Typed creation, resolution and lookup failures
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{code}`
//! 2. [`crate::application::services::RedirectResolver`] hands the request
//!    metadata and the [`clock::Clock`] to the store
//! 3. Under the record's lock the store reads the clock, and admits a
//!    [`entities::ClickEvent`] stamped with that time only if the record is
//!    still live
//! 4. The handler issues the redirect or maps the typed failure to 404 / 410

pub mod clock;
pub mod entities;
pub mod errors;
pub mod events;
pub mod repositories;
