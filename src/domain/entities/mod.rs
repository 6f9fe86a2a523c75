//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A persisted short code mapping
//! - [`NewUrlRecord`] - Insert payload for a new mapping

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
