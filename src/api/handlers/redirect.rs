//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::middleware::tracing::record_short_code;
use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// Resolution is delegated to [`crate::application::services::RedirectService`]:
/// cache first, then the store, with the cache refreshed on a miss.
///
/// # Response Codes
///
/// - **302 Found**: `Location` carries the long URL
/// - **404 Not Found**: the code was never issued
/// - **410 Gone**: the code has expired
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    record_short_code(&code);

    match state.redirect_service.resolve(&code).await? {
        Resolution::Redirect(long_url) => {
            Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response())
        }
        Resolution::NotFound => Err(AppError::not_found(
            "Short URL not found",
            json!({ "short_code": code }),
        )),
        Resolution::Expired => Err(AppError::expired(
            "Short URL has expired",
            json!({ "short_code": code }),
        )),
    }
}
