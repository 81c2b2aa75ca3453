//! Target URL validation.
//!
//! A target must parse as an absolute URL with a host. Nothing about the
//! content behind it is checked.

use url::Url;

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must be absolute with a host")]
    MissingHost,
}

/// Checks that `input` is a syntactically valid absolute URL.
///
/// Surrounding whitespace is trimmed; the URL is otherwise stored exactly as
/// given so the redirect reproduces it. Input containing characters that are
/// not visible ASCII is replaced by its percent-encoded serialization, which is
/// always a valid `Location` header value.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparseable or relative URLs.
/// Returns [`UrlValidationError::MissingHost`] for URLs such as `mailto:` that
/// have no host to redirect to.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_target_url(" https://example.com/a ").unwrap(), "https://example.com/a");
/// assert!(validate_target_url("not-a-url").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    if trimmed.bytes().all(|b| b.is_ascii_graphic()) {
        Ok(trimmed.to_string())
    } else {
        Ok(url.into())
    }
}
