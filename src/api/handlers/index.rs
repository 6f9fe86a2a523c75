//! Handlers for the service banner and browser noise.

use axum::http::StatusCode;

/// `GET /` liveness banner.
pub async fn index_handler() -> &'static str {
    "URL Shortener API is running!"
}

/// `GET /favicon.ico`, answered without touching the resolver.
pub async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}
