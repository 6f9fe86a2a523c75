//! Handler for short link creation.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;

use crate::api::dto::create::{CreateUrlRequest, CreateUrlResponse};
use crate::api::extract::ValidatedJson;
use crate::api::middleware::tracing::record_short_code;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::expiration::parse_expiration;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /urls` (also mounted at `POST /api/urls`)
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com",
///   "customAlias": "promo",            // optional
///   "expirationDate": "2030-01-31"     // optional, defaults to one year
/// }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "shortUrl": "https://sho.rt/promo",
///   "longUrl": "https://example.com"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: invalid body, URL, alias or date
/// - **409 Conflict**: the custom alias is taken
pub async fn create_url_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUrlRequest>,
) -> Result<(StatusCode, Json<CreateUrlResponse>), AppError> {
    let expires_at = payload
        .expiration_date
        .as_deref()
        .map(parse_expiration)
        .transpose()
        .map_err(|e| {
            AppError::bad_request(
                "Invalid expiration date format",
                json!({ "reason": e.to_string() }),
            )
        })?;

    let custom_alias = payload.alias().map(str::to_owned);

    let link = state
        .link_service
        .create_short_link(payload.long_url, custom_alias, expires_at)
        .await?;
    record_short_code(&link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_url: link.short_url,
            long_url: link.long_url,
        }),
    ))
}
