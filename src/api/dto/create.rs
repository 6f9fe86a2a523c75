//! DTOs for the short link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// Field names follow the public camelCase contract:
///
/// ```json
/// {
///   "longUrl": "https://example.com/very/long/path",
///   "customAlias": "promo",
///   "expirationDate": "2030-01-31T10:00:00Z"
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    /// The original URL to shorten.
    #[validate(length(min = 1, message = "longUrl must not be empty"))]
    pub long_url: String,

    /// Optional caller-chosen short code. An empty string counts as absent.
    pub custom_alias: Option<String>,

    /// Optional expiration date (RFC 3339 or `YYYY-MM-DD`).
    pub expiration_date: Option<String>,
}

impl CreateUrlRequest {
    /// Returns the custom alias, treating an empty value as absent.
    pub fn alias(&self) -> Option<&str> {
        self.custom_alias.as_deref().filter(|a| !a.is_empty())
    }
}

/// Response for a created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub short_url: String,
    pub long_url: String,
}
