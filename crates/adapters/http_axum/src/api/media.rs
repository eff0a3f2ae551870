//! `POST /micropub/media`: the media endpoint.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::response::{IntoResponse, Response};

use micropub_app::ports::{Backend, SiteConfiguration};
use micropub_domain::error::BadRequestError;

use crate::auth;
use crate::error::ApiError;
use crate::parse::{self, BodyEncoding};
use crate::state::AppState;

/// Possible responses from the media endpoint.
#[derive(Debug)]
pub enum MediaResponse {
    /// `201 Created` with the stored file's location.
    Created(String),
}

impl IntoResponse for MediaResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(url) => (StatusCode::CREATED, [(LOCATION, url)]).into_response(),
        }
    }
}

/// `POST /micropub/media`
pub async fn upload<B, C>(
    State(state): State<AppState<B, C>>,
    request: Request,
) -> Result<MediaResponse, ApiError>
where
    B: Backend + Send + Sync + 'static,
    C: SiteConfiguration + Send + Sync + 'static,
{
    let auth = auth::from_headers(request.headers());
    if BodyEncoding::from_headers(request.headers())? != BodyEncoding::Multipart {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        return Err(BadRequestError::UnsupportedContentType(content_type.to_string()).into());
    }

    let multipart = parse::extract_multipart(request).await?;
    let upload = parse::multipart::parse_media(multipart).await?;
    let auth = auth.or_token(upload.access_token);

    let url = state.micropub.upload_media(&auth, upload.file).await?;
    Ok(MediaResponse::Created(url))
}
