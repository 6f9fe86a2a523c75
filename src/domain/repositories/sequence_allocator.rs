//! Source of unique record identities.

use crate::error::AppError;
use async_trait::async_trait;

/// Allocates strictly increasing, globally unique integers.
///
/// Allocation is independent of inserting a row: the generated short code
/// is derived from the identity before the record is written. Uniqueness
/// under concurrent callers is guaranteed by the backing store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSequenceAllocator`] - PostgreSQL sequence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceAllocator: Send + Sync {
    /// Returns the next identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn next_id(&self) -> Result<i64, AppError>;
}
