//! Shared application state for axum handlers.

use std::sync::Arc;

use micropub_app::ports::{Backend, SiteConfiguration};
use micropub_app::services::micropub_service::MicropubService;
use micropub_app::services::query_service::QueryService;

/// Default cap on buffered request bodies, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Application state shared across all axum handlers.
///
/// Generic over the backend and the site configuration to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<B, C> {
    /// Authorization gate and dispatcher.
    pub micropub: Arc<MicropubService<B>>,
    /// Configuration queries.
    pub queries: Arc<QueryService<C>>,
    /// Largest request body accepted, in bytes.
    pub body_limit: usize,
}

impl<B, C> Clone for AppState<B, C> {
    fn clone(&self) -> Self {
        Self {
            micropub: Arc::clone(&self.micropub),
            queries: Arc::clone(&self.queries),
            body_limit: self.body_limit,
        }
    }
}

impl<B, C> AppState<B, C>
where
    B: Backend + Send + Sync + 'static,
    C: SiteConfiguration + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(micropub: MicropubService<B>, queries: QueryService<C>) -> Self {
        Self {
            micropub: Arc::new(micropub),
            queries: Arc::new(queries),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Override the request body limit.
    #[must_use]
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}
