//! Utility functions for code generation and input validation.
//!
//! - [`code_generator`] - Short code and identifier generation
//! - [`validators`] - URL, validity period and custom code validation

pub mod code_generator;
pub mod validators;
