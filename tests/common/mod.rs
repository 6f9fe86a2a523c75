#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use shorturl::application::services::{LinkPolicy, LinkService, RedirectService};
use shorturl::domain::obfuscator::Obfuscator;
use shorturl::infrastructure::cache::{CacheService, NullCache};
use shorturl::infrastructure::persistence::{PgSequenceAllocator, PgUrlRepository};
use shorturl::state::AppState;

pub const BASE_URL: &str = "http://localhost:3000";

pub fn test_obfuscator() -> Obfuscator {
    Obfuscator::new(1_580_030_173, 59_260_789, 1_163_945_558, 31).unwrap()
}

pub fn test_policy() -> LinkPolicy {
    LinkPolicy {
        base_url: format!("{BASE_URL}/"),
        default_expiration: chrono::Duration::days(365),
        alias_min_length: 1,
        alias_max_length: 20,
    }
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_cache(pool, Arc::new(NullCache::new()))
}

pub fn create_test_state_with_cache(pool: PgPool, cache: Arc<dyn CacheService>) -> AppState {
    let pool = Arc::new(pool);

    let url_repo = Arc::new(PgUrlRepository::new(pool.clone()));
    let sequence = Arc::new(PgSequenceAllocator::new(pool));

    let link_service = Arc::new(LinkService::new(
        url_repo.clone(),
        sequence,
        cache.clone(),
        test_obfuscator(),
        test_policy(),
    ));
    let redirect_service = Arc::new(RedirectService::new(url_repo.clone(), cache.clone()));

    AppState {
        link_service,
        redirect_service,
        url_repository: url_repo,
        cache,
    }
}

pub async fn create_test_url(
    pool: &PgPool,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (short_code, long_url, expires_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .bind(expires_at)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_expired_url(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO urls (short_code, long_url, expires_at) \
         VALUES ($1, $2, NOW() - INTERVAL '1 hour') RETURNING id",
    )
    .bind(code)
    .bind(url)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn get_expires_at(pool: &PgPool, code: &str) -> Option<DateTime<Utc>> {
    sqlx::query_scalar("SELECT expires_at FROM urls WHERE short_code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
