mod common;

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use shorturl::api::handlers::{favicon_handler, health_handler, index_handler};
use shorturl::infrastructure::cache::{CacheError, CacheResult, CacheService};

/// Cache whose backend is permanently unreachable.
struct UnreachableCache;

#[async_trait]
impl CacheService for UnreachableCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("unreachable".to_string()))
    }

    async fn set_url(
        &self,
        _short_code: &str,
        _long_url: &str,
        _expires_at: Option<DateTime<Utc>>,
    ) -> CacheResult<()> {
        Err(CacheError::ConnectionError("unreachable".to_string()))
    }

    async fn invalidate(&self, _short_code: &str) -> CacheResult<()> {
        Err(CacheError::ConnectionError("unreachable".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[sqlx::test]
async fn test_health_endpoint_degraded_cache(pool: PgPool) {
    let state = common::create_test_state_with_cache(pool, Arc::new(UnreachableCache));
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "error");
}

#[sqlx::test]
async fn test_redirect_survives_unreachable_cache(pool: PgPool) {
    common::create_test_url(&pool, "resilient", "https://example.com", None).await;
    let state = common::create_test_state_with_cache(pool, Arc::new(UnreachableCache));
    let app = Router::new()
        .route("/{code}", get(shorturl::api::handlers::redirect_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/resilient").await;

    assert_eq!(response.status_code(), 302);
}

#[tokio::test]
async fn test_index_and_favicon() {
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/favicon.ico", get(favicon_handler));

    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("URL Shortener API is running!");

    let response = server.get("/favicon.ico").await;
    assert_eq!(response.status_code(), 204);
}
