//! Cache population policy shared by the redirect and creation paths.

use super::service::CacheService;
use chrono::{DateTime, Utc};
use tracing::warn;

/// The action [`sync_entry`] applied to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    /// The mapping was stored with a TTL aligned to the record.
    Set,
    /// The expiry had already elapsed, so any entry was removed instead.
    Invalidated,
}

/// Writes a mapping to the cache, or deletes it if its expiry has elapsed.
///
/// Redis expiry has one-second resolution, so an `expires_at` in the same
/// second as `now` counts as elapsed. This covers the race between the
/// caller's expiration check and the cache write.
///
/// Cache failures are logged and swallowed: the store stays authoritative
/// and a failed write only costs a later cache miss.
pub async fn sync_entry(
    cache: &dyn CacheService,
    short_code: &str,
    long_url: &str,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> CacheWrite {
    match expires_at {
        Some(at) if at.timestamp() <= now.timestamp() => {
            if let Err(e) = cache.invalidate(short_code).await {
                warn!(short_code, error = %e, "Failed to invalidate elapsed cache entry");
            }
            CacheWrite::Invalidated
        }
        _ => {
            if let Err(e) = cache.set_url(short_code, long_url, expires_at).await {
                warn!(short_code, error = %e, "Failed to populate cache");
            }
            CacheWrite::Set
        }
    }
}
