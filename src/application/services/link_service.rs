//! Short link creation service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::obfuscator::Obfuscator;
use crate::domain::repositories::{SequenceAllocator, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, sync_entry};
use crate::utils::code_generator::{generate_code, validate_custom_alias};
use crate::utils::url_validator::validate_long_url;

/// Sequence ids tried before a generated-code insert gives up.
const GENERATED_INSERT_ATTEMPTS: usize = 3;

/// Creation policy knobs.
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    /// Public address the short code is appended to.
    pub base_url: String,
    /// Expiration applied when the caller supplies none.
    pub default_expiration: Duration,
    pub alias_min_length: usize,
    pub alias_max_length: usize,
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Service for creating shortened links.
///
/// Custom aliases are checked for availability and then inserted, with the
/// store's unique constraint settling any race. Generated codes come from
/// the sequence, the obfuscator and Base62 and need no existence check; an
/// id whose code was already claimed as an alias is skipped.
/// Every successful insert is written through to the cache.
pub struct LinkService<L: UrlRepository, S: SequenceAllocator> {
    url_repository: Arc<L>,
    sequence: Arc<S>,
    cache: Arc<dyn CacheService>,
    obfuscator: Obfuscator,
    policy: LinkPolicy,
}

impl<L: UrlRepository, S: SequenceAllocator> LinkService<L, S> {
    /// Creates a new link service.
    pub fn new(
        url_repository: Arc<L>,
        sequence: Arc<S>,
        cache: Arc<dyn CacheService>,
        obfuscator: Obfuscator,
        policy: LinkPolicy,
    ) -> Self {
        Self {
            url_repository,
            sequence,
            cache,
            obfuscator,
            policy,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `long_url` - The original URL to shorten
    /// - `custom_alias` - Optional caller-chosen short code
    /// - `expires_at` - Optional expiration; defaults to the policy expiration
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or alias is invalid.
    ///
    /// Returns [`AppError::Conflict`] if the custom alias is taken, whether
    /// detected up front or by the unique constraint on insert.
    ///
    /// Returns [`AppError::Internal`] on store failures, or when no free
    /// generated code is found within a few sequence ids.
    pub async fn create_short_link(
        &self,
        long_url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<CreatedLink, AppError> {
        validate_long_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let expires_at = match expires_at {
            Some(at) => at,
            None => Utc::now()
                .checked_add_signed(self.policy.default_expiration)
                .ok_or_else(|| {
                    AppError::internal(
                        "Default expiration is out of range",
                        json!({ "days": self.policy.default_expiration.num_days() }),
                    )
                })?,
        };
        let expires_at = Some(expires_at);

        let record = match custom_alias {
            Some(alias) => self.insert_custom(alias, long_url, expires_at).await?,
            None => self.insert_generated(long_url, expires_at).await?,
        };

        sync_entry(
            self.cache.as_ref(),
            &record.short_code,
            &record.long_url,
            record.expires_at,
            Utc::now(),
        )
        .await;

        Ok(CreatedLink {
            short_url: self.get_short_url(&record.short_code),
            short_code: record.short_code,
            long_url: record.long_url,
            expires_at: record.expires_at,
        })
    }

    /// Constructs the full short URL from the configured base address.
    pub fn get_short_url(&self, short_code: &str) -> String {
        format!(
            "{}/{}",
            self.policy.base_url.trim_end_matches('/'),
            short_code
        )
    }

    async fn insert_custom(
        &self,
        alias: String,
        long_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlRecord, AppError> {
        validate_custom_alias(
            &alias,
            self.policy.alias_min_length,
            self.policy.alias_max_length,
        )?;

        if self.url_repository.find_by_code(&alias).await?.is_some() {
            return Err(alias_conflict(&alias));
        }

        let new_record = NewUrlRecord {
            id: None,
            short_code: alias.clone(),
            long_url,
            expires_at,
        };

        match self.url_repository.insert(new_record).await {
            Err(AppError::Conflict { .. }) => {
                debug!(alias = %alias, "Lost custom alias race on insert");
                Err(alias_conflict(&alias))
            }
            other => other,
        }
    }

    /// Path B. A generated code can only collide with a custom alias that
    /// happens to spell it; the id is then skipped and a fresh one drawn.
    async fn insert_generated(
        &self,
        long_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlRecord, AppError> {
        let mut skipped = Vec::new();

        for attempt in 1..=GENERATED_INSERT_ATTEMPTS {
            let id = self.sequence.next_id().await?;
            let short_code = generate_code(id, &self.obfuscator)?;
            debug!(id, short_code = %short_code, "Generated short code");

            let new_record = NewUrlRecord {
                id: Some(id),
                short_code: short_code.clone(),
                long_url: long_url.clone(),
                expires_at,
            };

            match self.url_repository.insert(new_record).await {
                Err(AppError::Conflict { .. }) => {
                    warn!(
                        id,
                        short_code = %short_code,
                        attempt,
                        "Generated short code already taken by a custom alias, skipping id"
                    );
                    skipped.push(id);
                }
                other => return other,
            }
        }

        Err(AppError::internal(
            "Could not allocate a free short code",
            json!({ "skipped_ids": skipped }),
        ))
    }
}

fn alias_conflict(alias: &str) -> AppError {
    AppError::conflict("Custom alias already in use", json!({ "alias": alias }))
}
