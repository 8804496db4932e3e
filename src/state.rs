use std::sync::Arc;

use streets_backend::backend::SearchBackend;
use streets_backend::search::SearchService;

/// Shared application state. The backend client is created once at startup
/// and injected; handlers reach it through the search service.
pub struct AppState {
    pub search: SearchService,
}

impl AppState {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self {
            search: SearchService::new(backend),
        }
    }
}
