//! Resolution cache for fast redirect lookups.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation when no cache is configured
//!
//! [`sync_entry`] holds the write policy shared by the redirect and
//! creation paths.

mod null_cache;
mod redis_cache;
mod service;
mod sync;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
pub use sync::{CacheWrite, sync_entry};

#[cfg(test)]
pub use service::MockCacheService;
