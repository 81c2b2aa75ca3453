//! Click events recorded on successful redirects.

use chrono::{DateTime, Utc};
use url::Url;

/// Label used when a request carries no referrer.
pub const DIRECT_SOURCE: &str = "direct";

/// Label used for referrer-less requests from well-known crawlers.
pub const BOT_SOURCE: &str = "bot";

const BOT_MARKERS: &[&str] = &["bot", "crawler", "spider", "slurp"];

/// Request metadata captured by the web layer for a redirect.
///
/// All fields are optional; missing headers are normal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickMeta {
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

impl ClickMeta {
    /// Creates click metadata from raw header values.
    ///
    /// Empty header values are treated as absent.
    pub fn new(referrer: Option<&str>, user_agent: Option<&str>) -> Self {
        Self {
            referrer: non_empty(referrer),
            user_agent: non_empty(user_agent),
        }
    }
}

/// A single successful resolution of a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    pub referrer: Option<String>,
    /// Coarse origin descriptor, best-effort.
    pub source_label: Option<String>,
}

impl ClickEvent {
    /// Builds a click event stamped at `timestamp`.
    ///
    /// The source label is the referrer's host when the referrer is a URL,
    /// `"direct"` when there is no referrer (or `"bot"` for crawler user
    /// agents), and `None` when the referrer cannot be parsed.
    pub fn from_meta(timestamp: DateTime<Utc>, meta: ClickMeta) -> Self {
        let source_label = source_label(meta.referrer.as_deref(), meta.user_agent.as_deref());

        Self {
            timestamp,
            referrer: meta.referrer,
            source_label,
        }
    }
}

fn source_label(referrer: Option<&str>, user_agent: Option<&str>) -> Option<String> {
    match referrer {
        Some(referrer) => Url::parse(referrer)
            .ok()
            .and_then(|url| url.host_str().map(str::to_ascii_lowercase)),
        None if user_agent.is_some_and(is_bot) => Some(BOT_SOURCE.to_string()),
        None => Some(DIRECT_SOURCE.to_string()),
    }
}

fn is_bot(user_agent: &str) -> bool {
    let user_agent = user_agent.to_ascii_lowercase();
    BOT_MARKERS.iter().any(|marker| user_agent.contains(marker))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
