//! Micropub HTTP handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod media;
#[allow(clippy::missing_errors_doc)]
pub mod micropub;
#[allow(clippy::missing_errors_doc)]
pub mod query;

use axum::Router;
use axum::routing::{get, post};

use micropub_app::ports::{Backend, SiteConfiguration};

use crate::state::AppState;

/// Build the Micropub and media endpoint sub-router.
pub fn routes<B, C>() -> Router<AppState<B, C>>
where
    B: Backend + Send + Sync + 'static,
    C: SiteConfiguration + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/micropub",
            get(query::query::<B, C>).post(micropub::submit::<B, C>),
        )
        .route("/micropub/media", post(media::upload::<B, C>))
}
