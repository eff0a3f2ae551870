//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use micropub_app::ports::{Backend, SiteConfiguration};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves the Micropub and media endpoints plus `/health`. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level
/// using the `tracing` ecosystem, and caps request bodies at
/// [`AppState::body_limit`].
pub fn build<B, C>(state: AppState<B, C>) -> Router
where
    B: Backend + Send + Sync + 'static,
    C: SiteConfiguration + Send + Sync + 'static,
{
    let body_limit = state.body_limit;
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes::<B, C>())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
