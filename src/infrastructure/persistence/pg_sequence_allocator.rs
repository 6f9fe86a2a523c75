//! PostgreSQL sequence-backed identity allocator.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::SequenceAllocator;
use crate::error::AppError;

/// Allocates identities from the `urls_id_seq` sequence.
///
/// `nextval` is atomic and never hands out the same value twice, even when
/// the surrounding transaction rolls back.
pub struct PgSequenceAllocator {
    pool: Arc<PgPool>,
}

impl PgSequenceAllocator {
    /// Creates a new allocator with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceAllocator for PgSequenceAllocator {
    async fn next_id(&self) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar("SELECT nextval('urls_id_seq')")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(id)
    }
}
