//! `POST /micropub`: create, update, delete and undelete.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};

use micropub_app::ports::{Backend, SiteConfiguration};
use micropub_app::services::micropub_service::Outcome;

use crate::error::ApiError;
use crate::state::AppState;
use crate::{auth, parse};

/// Possible responses from the Micropub endpoint.
#[derive(Debug)]
pub enum SubmitResponse {
    /// `202 Accepted` with the new item's location.
    Accepted(String),
    /// `200 OK` with the updated item's location.
    Updated(String),
    /// `200 OK`, no body.
    Ok,
}

impl From<Outcome> for SubmitResponse {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Created(url) => Self::Accepted(url),
            Outcome::Updated(url) => Self::Updated(url),
            Outcome::Deleted | Outcome::Undeleted => Self::Ok,
        }
    }
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(url) => (StatusCode::ACCEPTED, [(LOCATION, url)]).into_response(),
            Self::Updated(url) => (StatusCode::OK, [(LOCATION, url)]).into_response(),
            Self::Ok => StatusCode::OK.into_response(),
        }
    }
}

/// `POST /micropub`
///
/// Parse → resolve → authorize → dispatch. Parsing and resolution failures
/// never reach the backend.
pub async fn submit<B, C>(
    State(state): State<AppState<B, C>>,
    request: Request,
) -> Result<SubmitResponse, ApiError>
where
    B: Backend + Send + Sync + 'static,
    C: SiteConfiguration + Send + Sync + 'static,
{
    let auth = auth::from_headers(request.headers());
    let parsed = parse::parse_body(request, state.body_limit).await?;
    let auth = auth.or_token(parsed.access_token);
    let submission = parsed.draft.resolve()?;

    let outcome = state.micropub.submit(&auth, submission).await?;
    Ok(outcome.into())
}
