//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create;
pub mod health;
pub mod index;
pub mod redirect;

pub use create::create_url_handler;
pub use health::health_handler;
pub use index::{favicon_handler, index_handler};
pub use redirect::redirect_handler;
