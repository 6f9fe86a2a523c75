//! URL record entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// A persisted short code to long URL mapping.
///
/// Records are written once and never updated in place. Once
/// `expires_at` has passed the record must no longer be served.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        short_code: String,
        long_url: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            short_code,
            long_url,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the record's expiration is strictly before `now`.
    ///
    /// Records without an expiration never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }

    /// Returns true if the record has expired as of the current wall-clock time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for inserting a new record.
///
/// `id` carries the pre-allocated sequence value for generated codes so the
/// record identity and its short code stay correlated. Custom aliases leave
/// it empty and take a fresh identity from the sequence default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub id: Option<i64>,
    pub short_code: String,
    pub long_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}
