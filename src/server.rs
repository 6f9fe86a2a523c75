//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, cache setup and the Axum
//! server lifecycle.

use crate::application::services::{LinkPolicy, LinkService, RedirectService};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{PgSequenceAllocator, PgUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made before startup gives up on PostgreSQL.
const DB_CONNECT_ATTEMPTS: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - PostgreSQL connection pool
/// - Migrations
/// - Obfuscator
/// - Redis cache (or NullCache when not configured)
/// - Axum HTTP server
///
/// Nothing is bound until every dependency is ready.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The obfuscator keys are invalid
/// - Redis is configured but unreachable
/// - Server bind fails or a runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    let obfuscator = config.obfuscator()?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        let redis = RedisCache::connect(redis_url, config.cache_ttl_seconds)
            .await
            .context("Failed to connect to Redis")?;
        tracing::info!("Cache enabled (Redis)");
        Arc::new(redis)
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let pool = Arc::new(pool);
    let url_repository = Arc::new(PgUrlRepository::new(pool.clone()));
    let sequence = Arc::new(PgSequenceAllocator::new(pool));

    let policy = LinkPolicy {
        base_url: config.base_url.clone(),
        default_expiration: chrono::Duration::days(config.default_expiration_days),
        alias_min_length: config.custom_alias_min_length,
        alias_max_length: config.custom_alias_max_length,
    };

    let state = AppState {
        link_service: Arc::new(LinkService::new(
            url_repository.clone(),
            sequence,
            cache.clone(),
            obfuscator,
            policy,
        )),
        redirect_service: Arc::new(RedirectService::new(
            url_repository.clone(),
            cache.clone(),
        )),
        url_repository,
        cache,
    };

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the pool, retrying the initial connection with exponential backoff.
async fn connect_database(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    // 100ms, 1s, then capped at 5s
    let strategy = ExponentialBackoff::from_millis(10)
        .factor(10)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(DB_CONNECT_ATTEMPTS - 1);

    Retry::start(strategy, || {
        let options = options.clone();
        let url = config.database_url.clone();
        async move {
            options
                .connect(&url)
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Database connection attempt failed"))
        }
    })
    .await
    .context("Failed to connect to database")
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
