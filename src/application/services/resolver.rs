//! Redirect resolution with click recording.

use std::sync::Arc;
use tracing::{debug, info};

use super::registry::ShortcodeRegistry;
use crate::domain::entities::ClickMeta;
use crate::domain::errors::ResolutionError;
use crate::domain::events::LogEvent;
use crate::domain::repositories::ClickOutcome;

/// Resolves short codes to their targets, recording one click per success.
pub struct RedirectResolver {
    registry: Arc<ShortcodeRegistry>,
}

impl RedirectResolver {
    pub fn new(registry: Arc<ShortcodeRegistry>) -> Self {
        Self { registry }
    }

    /// Resolves `code` and records the click.
    ///
    /// # Request Flow
    ///
    /// 1. Ask the registry to append the click
    /// 2. The store reads the clock while holding the record's ledger lock; that
    ///    instant is both the expiry reference and the click timestamp
    /// 3. Return the target URL
    ///
    /// A record expires exactly at `expires_at`: a resolution at that instant
    /// is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::CodeNotFound`] if the code was never issued.
    /// Returns [`ResolutionError::CodeExpired`] if the code is past its expiry;
    /// no click is recorded in that case.
    pub async fn resolve(&self, code: &str, meta: ClickMeta) -> Result<String, ResolutionError> {
        match self.registry.append_click(code, meta).await? {
            ClickOutcome::Recorded {
                target_url,
                click_count,
            } => {
                debug!(code, click_count, "Resolved short link");
                Ok(target_url)
            }
            ClickOutcome::Expired { expires_at } => {
                info!(code, %expires_at, "Rejected resolution of expired short link");
                self.registry.events().record(LogEvent::warn(
                    self.registry.clock().as_ref(),
                    "resolver",
                    format!("Expired shortcode requested: {}", code),
                ));
                Err(ResolutionError::CodeExpired {
                    code: code.to_string(),
                    expired_at: expires_at,
                })
            }
            ClickOutcome::NotFound => {
                debug!(code, "Unknown short link requested");
                self.registry.events().record(LogEvent::warn(
                    self.registry.clock().as_ref(),
                    "resolver",
                    format!("Unknown shortcode requested: {}", code),
                ));
                Err(ResolutionError::CodeNotFound(code.to_string()))
            }
        }
    }
}
