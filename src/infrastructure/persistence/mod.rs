//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - URL record storage and retrieval
//! - [`PgSequenceAllocator`] - Identity allocation from `urls_id_seq`

pub mod pg_sequence_allocator;
pub mod pg_url_repository;

pub use pg_sequence_allocator::PgSequenceAllocator;
pub use pg_url_repository::PgUrlRepository;
