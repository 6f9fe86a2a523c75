mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use shorturl::api::handlers::{create_url_handler, redirect_handler};
use shorturl::utils::base62;
use shorturl::utils::code_generator::generate_code;

fn create_app(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/urls", post(create_url_handler))
        .route("/api/urls", post(create_url_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn short_code_of(body: &serde_json::Value) -> String {
    let short_url = body["shortUrl"].as_str().unwrap();
    short_url
        .strip_prefix(&format!("{}/", common::BASE_URL))
        .unwrap()
        .to_string()
}

#[sqlx::test]
async fn test_create_generated_code(pool: PgPool) {
    let server = create_app(pool);

    let response = server
        .post("/urls")
        .json(&json!({ "longUrl": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["longUrl"], "https://example.com/some/long/path");

    let code = short_code_of(&body);
    assert!(base62::is_base62(&code));

    let id = common::test_obfuscator()
        .deobfuscate(base62::decode(&code).unwrap())
        .unwrap();
    assert!(id > 0);
}

#[sqlx::test]
async fn test_create_then_redirect(pool: PgPool) {
    let server = create_app(pool);

    let response = server
        .post("/urls")
        .json(&json!({ "longUrl": "https://example.com/target" }))
        .await;
    let code = short_code_of(&response.json::<serde_json::Value>());

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_create_distinct_codes_for_same_url(pool: PgPool) {
    let server = create_app(pool);
    let payload = json!({ "longUrl": "https://example.com" });

    let first = server.post("/urls").json(&payload).await;
    let second = server.post("/urls").json(&payload).await;

    assert_ne!(
        first.json::<serde_json::Value>()["shortUrl"],
        second.json::<serde_json::Value>()["shortUrl"]
    );
}

#[sqlx::test]
async fn test_create_custom_alias(pool: PgPool) {
    let server = create_app(pool);

    let response = server
        .post("/urls")
        .json(&json!({ "longUrl": "https://example.com", "customAlias": "promo" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["shortUrl"], "http://localhost:3000/promo");
}

#[sqlx::test]
async fn test_create_duplicate_alias_conflict(pool: PgPool) {
    let server = create_app(pool);
    let payload = json!({ "longUrl": "https://example.com", "customAlias": "taken" });

    server
        .post("/urls")
        .json(&payload)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server.post("/urls").json(&payload).await;

    response.assert_status(axum::http::StatusCode::CONFLICT);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "conflict");
}

#[sqlx::test]
async fn test_create_empty_alias_generates_code(pool: PgPool) {
    let server = create_app(pool);

    let response = server
        .post("/urls")
        .json(&json!({ "longUrl": "https://example.com", "customAlias": "" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let code = short_code_of(&response.json::<serde_json::Value>());
    assert!(base62::is_base62(&code));
}

#[sqlx::test]
async fn test_create_api_prefix(pool: PgPool) {
    let server = create_app(pool);

    let response = server
        .post("/api/urls")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
}

#[sqlx::test]
async fn test_create_invalid_url(pool: PgPool) {
    let server = create_app(pool);

    for long_url in ["not-a-url", "ftp://example.com/file", "https://"] {
        let response = server
            .post("/urls")
            .json(&json!({ "longUrl": long_url }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"]["code"], "validation_error", "{long_url}");
    }
}

#[sqlx::test]
async fn test_create_missing_long_url(pool: PgPool) {
    let server = create_app(pool);

    let response = server
        .post("/urls")
        .json(&json!({ "customAlias": "promo" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[sqlx::test]
async fn test_create_invalid_alias(pool: PgPool) {
    let server = create_app(pool);

    let too_long = "a".repeat(21);

    for alias in ["has space", "a/b", "health", too_long.as_str()] {
        let response = server
            .post("/urls")
            .json(&json!({ "longUrl": "https://example.com", "customAlias": alias }))
            .await;

        response.assert_status_bad_request();
    }
}

#[sqlx::test]
async fn test_create_invalid_expiration_date(pool: PgPool) {
    let server = create_app(pool);

    let response = server
        .post("/urls")
        .json(&json!({ "longUrl": "https://example.com", "expirationDate": "next tuesday" }))
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_create_default_expiration_is_one_year(pool: PgPool) {
    let server = create_app(pool.clone());

    let before = Utc::now();
    server
        .post("/urls")
        .json(&json!({ "longUrl": "https://example.com", "customAlias": "yearly" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    let after = Utc::now();

    let expires_at = common::get_expires_at(&pool, "yearly").await.unwrap();
    assert!(expires_at >= before + Duration::days(365) - Duration::seconds(1));
    assert!(expires_at <= after + Duration::days(365) + Duration::seconds(1));
}

#[sqlx::test]
async fn test_create_explicit_expiration(pool: PgPool) {
    let server = create_app(pool.clone());

    server
        .post("/urls")
        .json(&json!({
            "longUrl": "https://example.com",
            "customAlias": "dated",
            "expirationDate": "2099-01-31T10:00:00Z"
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let expires_at = common::get_expires_at(&pool, "dated").await.unwrap();
    assert_eq!(expires_at.to_rfc3339(), "2099-01-31T10:00:00+00:00");
}

#[sqlx::test]
async fn test_create_past_expiration_then_gone(pool: PgPool) {
    let server = create_app(pool);

    server
        .post("/urls")
        .json(&json!({
            "longUrl": "https://example.com",
            "customAlias": "bygone",
            "expirationDate": "2000-01-01"
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server.get("/bygone").await;

    assert_eq!(response.status_code(), 410);
}

#[sqlx::test]
async fn test_generated_code_claimed_as_alias_is_skipped(pool: PgPool) {
    let server = create_app(pool);
    let obfuscator = common::test_obfuscator();

    // The alias row takes id 1, so the next generated id is 2.
    let claimed = generate_code(2, &obfuscator).unwrap();
    server
        .post("/urls")
        .json(&json!({ "longUrl": "https://alias.example.com", "customAlias": claimed }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/urls")
        .json(&json!({ "longUrl": "https://generated.example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let code = short_code_of(&response.json::<serde_json::Value>());
    assert_eq!(code, generate_code(3, &obfuscator).unwrap());

    let redirect = server.get(&format!("/{claimed}")).await;
    assert_eq!(redirect.header("location"), "https://alias.example.com");
}
