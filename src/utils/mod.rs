//! Utility functions for short code generation and URL processing.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_sanitizer`] - URL validation and canonicalization

pub mod code_generator;
pub mod url_sanitizer;
