//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{PgSequenceAllocator, PgUrlRepository};

/// Cheaply clonable handle to the services.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<PgUrlRepository, PgSequenceAllocator>>,
    pub redirect_service: Arc<RedirectService<PgUrlRepository>>,
    /// Store handle used by the health check.
    pub url_repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
}
