//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the durable store behind the Repository pattern.
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - Short code record storage
//! - [`SequenceAllocator`] - Identity allocation for generated codes

pub mod sequence_allocator;
pub mod url_repository;

pub use sequence_allocator::SequenceAllocator;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use sequence_allocator::MockSequenceAllocator;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
