//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;

pub use link_service::{CreatedLink, LinkPolicy, LinkService};
pub use redirect_service::{RedirectService, Resolution};
