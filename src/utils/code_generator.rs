//! Shortcode generation and validation utilities.
//!
//! Generation and validation are pure: neither looks at the registry. Whether a
//! code is free is decided by the registry's insert-if-absent.

use crate::domain::errors::CreationError;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::distr::{Alphanumeric, SampleString};
use rand::rngs::StdRng;

/// Shortest accepted code.
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest accepted code.
pub const MAX_CODE_LENGTH: usize = 20;

/// Length of generated codes unless configured otherwise.
///
/// 62^6 ≈ 5.7e10 possible codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Source of candidate shortcodes.
#[cfg_attr(test, mockall::automock)]
pub trait ShortcodeGenerator: Send + Sync {
    /// Returns a fresh candidate code. Successive calls are not predictable.
    fn allocate(&self) -> String;
}

/// Draws codes uniformly from `[A-Za-z0-9]`.
pub struct RandomCodeGenerator {
    length: usize,
    seeded: Option<Mutex<StdRng>>,
}

impl RandomCodeGenerator {
    /// Creates a generator backed by the thread-local RNG.
    ///
    /// `length` is clamped to the accepted code range so every generated code
    /// passes [`validate_code`].
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
            seeded: None,
        }
    }

    /// Creates a deterministic generator for tests and reproducible runs.
    pub fn seeded(length: usize, seed: u64) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl ShortcodeGenerator for RandomCodeGenerator {
    fn allocate(&self) -> String {
        match &self.seeded {
            Some(rng) => Alphanumeric.sample_string(&mut *rng.lock(), self.length),
            None => Alphanumeric.sample_string(&mut rand::rng(), self.length),
        }
    }
}

/// Validates a caller-supplied shortcode.
///
/// # Rules
///
/// - Length: 4-20 characters
/// - Allowed characters: ASCII letters and digits (case-sensitive)
///
/// # Errors
///
/// Returns [`CreationError::InvalidShortcodeFormat`] if any rule is violated.
pub fn validate_code(candidate: &str) -> Result<String, CreationError> {
    if !candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CreationError::InvalidShortcodeFormat(format!(
            "must contain only letters and digits: '{}'",
            candidate
        )));
    }

    if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&candidate.len()) {
        return Err(CreationError::InvalidShortcodeFormat(format!(
            "length must be between {} and {}, got {}",
            MIN_CODE_LENGTH,
            MAX_CODE_LENGTH,
            candidate.len()
        )));
    }

    Ok(candidate.to_string())
}
