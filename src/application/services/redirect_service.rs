//! Cache-aside short code resolution.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, sync_entry};
use crate::utils::code_generator::SHORT_CODE_MAX_LENGTH;

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The code maps to a live URL.
    Redirect(String),
    /// The code was never issued.
    NotFound,
    /// The code exists but its expiration has passed.
    Expired,
}

/// Service resolving short codes to their long URLs.
///
/// # Request Flow
///
/// 1. Check cache; a hit redirects without touching the store
/// 2. On miss (or cache error), query the store
/// 3. Expired records invalidate the cache key and report [`Resolution::Expired`]
/// 4. Live records are written back to the cache with a TTL aligned to
///    their expiration
///
/// There is no negative caching: unknown codes leave the cache untouched.
pub struct RedirectService<L: UrlRepository> {
    url_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
}

impl<L: UrlRepository> RedirectService<L> {
    /// Creates a new redirect service.
    pub fn new(url_repository: Arc<L>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            url_repository,
            cache,
        }
    }

    /// Resolves a short code.
    ///
    /// A cached entry is served as-is, even if the record changed in the
    /// store since it was written; it lives until its TTL or an explicit
    /// invalidation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried. Cache
    /// failures never fail the resolution.
    pub async fn resolve(&self, short_code: &str) -> Result<Resolution, AppError> {
        if !is_plausible_code(short_code) {
            return Ok(Resolution::NotFound);
        }

        match self.cache.get_url(short_code).await {
            Ok(Some(url)) => {
                debug!("Cache HIT for {}", short_code);
                return Ok(Resolution::Redirect(url));
            }
            Ok(None) => debug!("Cache MISS for {}", short_code),
            Err(e) => warn!(short_code, error = %e, "Cache read failed, falling back to store"),
        }

        let Some(record) = self.url_repository.find_by_code(short_code).await? else {
            return Ok(Resolution::NotFound);
        };

        let now = Utc::now();
        if record.is_expired_at(now) {
            if let Err(e) = self.cache.invalidate(short_code).await {
                warn!(short_code, error = %e, "Failed to invalidate expired cache entry");
            }
            return Ok(Resolution::Expired);
        }

        sync_entry(
            self.cache.as_ref(),
            &record.short_code,
            &record.long_url,
            record.expires_at,
            now,
        )
        .await;

        Ok(Resolution::Redirect(record.long_url))
    }
}

/// Codes outside the short code alphabet or column width cannot exist.
fn is_plausible_code(short_code: &str) -> bool {
    !short_code.is_empty()
        && short_code.len() <= SHORT_CODE_MAX_LENGTH
        && short_code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
