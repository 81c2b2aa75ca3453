//! Utility functions for code generation and URL checks.
//!
//! - [`code_generator`] - Random shortcode allocation and format validation
//! - [`url_validator`] - Target URL well-formedness checks

pub mod code_generator;
pub mod url_validator;
