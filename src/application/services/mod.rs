//! Business logic services for the application layer.

pub mod analytics;
pub mod registry;
pub mod resolver;

pub use analytics::{AnalyticsStore, LinkSummary};
pub use registry::{RegistrySettings, ShortcodeRegistry};
pub use resolver::RedirectResolver;
