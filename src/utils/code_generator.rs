//! Short code generation and validation utilities.
//!
//! Generated codes are the Base62 rendering of an obfuscated sequence id.
//! Custom aliases are checked against the alias character set, the
//! configured length bounds and the reserved route names.

use crate::domain::obfuscator::Obfuscator;
use crate::error::AppError;
use crate::utils::base62;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Width of the `short_code` column; no alias bound may exceed it.
pub const SHORT_CODE_MAX_LENGTH: usize = 20;

/// Compiled regex for custom alias validation.
static CUSTOM_ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Reserved aliases that cannot be used as short codes.
///
/// These collide with the service's own routes.
pub const RESERVED_ALIASES: &[&str] = &["urls", "api", "health"];

/// Derives the short code for a sequence id.
///
/// The id is permuted by the obfuscator and then Base62-encoded, so
/// consecutive ids yield unrelated-looking codes.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the id is negative or falls outside the
/// obfuscator's domain (the sequence has outgrown the configured bit width).
pub fn generate_code(id: i64, obfuscator: &Obfuscator) -> Result<String, AppError> {
    let raw = u64::try_from(id).map_err(|_| {
        AppError::internal(
            "Sequence returned a negative id",
            json!({ "id": id }),
        )
    })?;

    let obfuscated = obfuscator.obfuscate(raw).map_err(|e| {
        AppError::internal(
            "Failed to obfuscate sequence id",
            json!({ "id": id, "reason": e.to_string() }),
        )
    })?;

    Ok(base62::encode(obfuscated))
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: `min_length..=max_length` characters
/// - Allowed characters: ASCII letters, digits, underscores, hyphens
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any validation rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_alias("promo", 1, 20).is_ok());
/// assert!(validate_custom_alias("my_link-2024", 1, 20).is_ok());
///
/// assert!(validate_custom_alias("", 1, 20).is_err());          // Too short
/// assert!(validate_custom_alias("has space", 1, 20).is_err()); // Bad character
/// assert!(validate_custom_alias("api", 1, 20).is_err());       // Reserved
/// ```
pub fn validate_custom_alias(
    alias: &str,
    min_length: usize,
    max_length: usize,
) -> Result<(), AppError> {
    let length = alias.chars().count();
    if length < min_length || length > max_length {
        return Err(AppError::bad_request(
            format!("Custom alias must be {min_length}-{max_length} characters"),
            json!({ "provided_length": length }),
        ));
    }

    if !CUSTOM_ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, underscores and hyphens",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
