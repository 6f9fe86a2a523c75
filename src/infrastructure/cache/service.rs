//! Cache service trait and error types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short code to long URL mappings.
///
/// The cache is an optimization, never a source of truth. Implementations
/// report transport failures as [`CacheError`]; callers decide how to
/// degrade (reads fall back to the store, writes are logged).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with absolute expiry
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the long URL for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached.
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping.
    ///
    /// # Arguments
    ///
    /// - `short_code` - The short code key
    /// - `long_url` - The URL to cache
    /// - `expires_at` - Absolute expiry instant; `None` applies the
    ///   implementation's default TTL
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the write fails.
    async fn set_url(
        &self,
        short_code: &str,
        long_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> CacheResult<()>;

    /// Removes a cached mapping.
    ///
    /// Used when a record is found expired or its expiry already elapsed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the delete fails.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;
}
