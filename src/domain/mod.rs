//! Domain layer containing business entities and logic.
//!
//! It defines entities, repository interfaces and the id obfuscator,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`obfuscator`] - Reversible permutation applied to sequence ids
//!
//! Repository traits define contracts implemented by the infrastructure layer;
//! business logic lives in [`crate::application::services`].

pub mod entities;
pub mod obfuscator;
pub mod repositories;
