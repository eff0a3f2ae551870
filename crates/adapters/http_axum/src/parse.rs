//! Request body decoding.
//!
//! Picks a decoder from the `Content-Type` header and turns the body into a
//! [`RequestDraft`] plus any `access_token` found in it. Decoding either
//! succeeds completely or fails with a [`BadRequestError`]; nothing partial
//! is ever handed on.

pub mod form;
pub mod json;
pub mod multipart;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;

use micropub_domain::draft::RequestDraft;
use micropub_domain::error::BadRequestError;

/// The body encodings the Micropub endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Form,
    Multipart,
    Json,
}

impl BodyEncoding {
    /// Pick the encoding from a `Content-Type` value, ignoring parameters
    /// such as `charset` or `boundary`.
    ///
    /// # Errors
    ///
    /// Returns [`BadRequestError::MissingContentType`] or
    /// [`BadRequestError::UnsupportedContentType`].
    pub fn from_content_type(value: Option<&str>) -> Result<Self, BadRequestError> {
        let value = value.ok_or(BadRequestError::MissingContentType)?;
        let essence = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/x-www-form-urlencoded" => Ok(Self::Form),
            "multipart/form-data" => Ok(Self::Multipart),
            "application/json" => Ok(Self::Json),
            _ => Err(BadRequestError::UnsupportedContentType(value.to_string())),
        }
    }

    /// Encoding declared by the request headers.
    ///
    /// # Errors
    ///
    /// Same as [`from_content_type`](Self::from_content_type); a header that
    /// is not valid ASCII counts as unsupported.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, BadRequestError> {
        match headers.get(CONTENT_TYPE) {
            None => Err(BadRequestError::MissingContentType),
            Some(value) => Self::from_content_type(Some(value.to_str().map_err(|_| {
                BadRequestError::UnsupportedContentType(
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })?)),
        }
    }
}

/// A decoded body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBody {
    pub draft: RequestDraft,
    /// Token sent in the body rather than the `Authorization` header.
    pub access_token: Option<String>,
}

/// Decode a Micropub request body of any supported encoding.
///
/// Form and JSON bodies are buffered up to `body_limit` bytes; multipart
/// bodies are streamed part by part.
///
/// # Errors
///
/// Returns a [`BadRequestError`] for unsupported content types, oversized
/// or malformed bodies.
pub async fn parse_body(request: Request, body_limit: usize) -> Result<ParsedBody, BadRequestError> {
    match BodyEncoding::from_headers(request.headers())? {
        BodyEncoding::Form => form::parse(&read_body(request, body_limit).await?),
        BodyEncoding::Json => json::parse(&read_body(request, body_limit).await?),
        BodyEncoding::Multipart => multipart::parse(extract_multipart(request).await?).await,
    }
}

pub(crate) async fn read_body(
    request: Request,
    body_limit: usize,
) -> Result<Vec<u8>, BadRequestError> {
    axum::body::to_bytes(request.into_body(), body_limit)
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|err| BadRequestError::MalformedBody(err.into()))
}

pub(crate) async fn extract_multipart(request: Request) -> Result<Multipart, BadRequestError> {
    Multipart::from_request(request, &())
        .await
        .map_err(|rejection| BadRequestError::MalformedBody(rejection.body_text().into()))
}

/// Strip a trailing `[]` array marker from a field name.
pub(crate) fn strip_array_suffix(name: &str) -> &str {
    name.strip_suffix("[]").unwrap_or(name)
}
