//! `GET /micropub?q=…`: configuration and source queries.

use axum::Json;
use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use micropub_app::ports::{Backend, SiteConfiguration};
use micropub_app::services::query_service::Query;
use micropub_domain::error::BadRequestError;

use crate::auth;
use crate::error::ApiError;
use crate::parse::strip_array_suffix;

/// Parse a query string into a [`Query`].
///
/// # Errors
///
/// Returns [`BadRequestError::MissingParameter`] without `q` (or without
/// `url` for `q=source`) and [`BadRequestError::UnknownQuery`] for anything
/// not in [`Query::SUPPORTED`].
pub fn parse_query(raw: &str) -> Result<Query, BadRequestError> {
    let mut q = None;
    let mut target = None;
    let mut search = None;
    let mut properties = Vec::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        let value = value.into_owned();
        match strip_array_suffix(&key) {
            "q" => q = Some(value),
            "url" => target = Some(value),
            "search" => search = Some(value),
            "properties" => properties.push(value),
            _ => {}
        }
    }

    match q.as_deref() {
        None | Some("") => Err(BadRequestError::MissingParameter("q")),
        Some("config") => Ok(Query::Config),
        Some("syndicate-to") => Ok(Query::SyndicateTo),
        Some("channel") => Ok(Query::Channel),
        Some("category") => Ok(Query::Category { search }),
        Some("post-types") => Ok(Query::PostTypes),
        Some("source") => Ok(Query::Source {
            url: target
                .filter(|url| !url.is_empty())
                .ok_or(BadRequestError::MissingParameter("url"))?,
            properties,
        }),
        Some(other) => Err(BadRequestError::UnknownQuery(other.to_string())),
    }
}

/// `GET /micropub`
pub async fn query<B, C>(
    State(state): State<crate::state::AppState<B, C>>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Response, ApiError>
where
    B: Backend + Send + Sync + 'static,
    C: SiteConfiguration + Send + Sync + 'static,
{
    let query = parse_query(raw.as_deref().unwrap_or_default())?;
    tracing::debug!(q = query.name(), "answering query");

    let response = match query {
        Query::Config => Json(state.queries.config()).into_response(),
        Query::SyndicateTo => Json(state.queries.syndicate_to()).into_response(),
        Query::Channel => Json(state.queries.channels()).into_response(),
        Query::Category { search } => {
            Json(state.queries.categories(search.as_deref())).into_response()
        }
        Query::PostTypes => Json(state.queries.post_types()).into_response(),
        Query::Source { url, properties } => {
            let auth = auth::from_headers(&headers);
            let item = state.micropub.source(&auth, &url, &properties).await?;
            Json(Value::Object(item)).into_response()
        }
    };
    Ok(response)
}
