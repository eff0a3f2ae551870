//! HTTP error response mapping.
//!
//! Every failure becomes a newline-terminated JSON object with exactly two
//! keys, `error` and `error_description`, as Micropub clients expect.

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use micropub_domain::error::{BadRequestError, MicropubError};

/// JSON error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    error_description: &'a str,
}

/// Maps [`MicropubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(MicropubError);

impl ApiError {
    /// Status code and machine-readable error code for this error.
    #[must_use]
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            MicropubError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            MicropubError::InsufficientScope => (StatusCode::FORBIDDEN, "insufficient_scope"),
            MicropubError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            MicropubError::NotImplemented => (StatusCode::NOT_IMPLEMENTED, "not_implemented"),
            MicropubError::Backend(_) => (StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
        }
    }

    /// The wrapped error.
    #[must_use]
    pub fn inner(&self) -> &MicropubError {
        &self.0
    }
}

impl From<MicropubError> for ApiError {
    fn from(err: MicropubError) -> Self {
        Self(err)
    }
}

impl From<BadRequestError> for ApiError {
    fn from(err: BadRequestError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.classify();
        let description = match &self.0 {
            MicropubError::BadRequest(err) => err.to_string(),
            MicropubError::InsufficientScope => "Insufficient scope.".to_string(),
            MicropubError::NotFound(err) => err.to_string(),
            MicropubError::NotImplemented => "Not implemented.".to_string(),
            MicropubError::Backend(err) => {
                tracing::error!(error = %err, "backend error");
                "Internal server error.".to_string()
            }
        };

        let mut body = serde_json::to_vec(&ErrorBody {
            error,
            error_description: &description,
        })
        .unwrap_or_default();
        body.push(b'\n');

        (status, [(CONTENT_TYPE, "application/json")], body).into_response()
    }
}
