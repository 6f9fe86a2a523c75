//! API route configuration.

use crate::api::handlers::create_url_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Link management routes, nested under both `/` and `/api`.
///
/// # Endpoints
///
/// - `POST /urls` - Create a short link
pub fn link_routes() -> Router<AppState> {
    Router::new().route("/urls", post(create_url_handler))
}
