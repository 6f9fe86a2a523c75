//! Utility functions for code generation and request validation.
//!
//! - [`base62`] - Base62 codec for short codes
//! - [`code_generator`] - Short code generation and custom alias validation
//! - [`expiration`] - Expiration date parsing
//! - [`url_validator`] - Long URL validation

pub mod base62;
pub mod code_generator;
pub mod expiration;
pub mod url_validator;
