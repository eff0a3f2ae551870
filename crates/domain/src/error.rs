//! Common error types used across the workspace.
//!
//! Every failure a request can end in is one [`MicropubError`] variant. The
//! HTTP adapter maps each variant to exactly one status code and one
//! machine-readable error code, so adding a variant here means adding a row
//! to that mapping.

use std::error::Error as StdError;

use crate::action::Action;

/// Boxed error used for failures the router does not classify.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Top-level error for every Micropub operation.
#[derive(Debug, thiserror::Error)]
pub enum MicropubError {
    /// The request could not be decoded or resolved, or the backend
    /// rejected it as invalid.
    #[error("invalid request")]
    BadRequest(#[from] BadRequestError),

    /// The caller's credentials do not grant the scope the action needs.
    #[error("insufficient scope")]
    InsufficientScope,

    /// The target item does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The backend does not support the requested operation.
    #[error("not implemented")]
    NotImplemented,

    /// Any other backend failure.
    #[error("backend error")]
    Backend(#[source] BoxError),
}

impl MicropubError {
    /// Wrap an arbitrary error as an unclassified backend failure.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }
}

/// Reasons a request is refused as malformed.
#[derive(Debug, thiserror::Error)]
pub enum BadRequestError {
    #[error("missing content type")]
    MissingContentType,

    #[error("unsupported content type `{0}`")]
    UnsupportedContentType(String),

    #[error("malformed request body: {0}")]
    MalformedBody(#[source] BoxError),

    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("`{field}` must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("request has neither a type nor a url")]
    MissingTypeAndUrl,

    #[error("create requires a type")]
    MissingType,

    #[error("{0} requires a url")]
    MissingUrl(Action),

    #[error("file parts are only accepted when creating, not on {0}")]
    UnexpectedAttachments(Action),

    #[error("properties are only accepted when creating, not on {0}; use replace, add or delete")]
    UnexpectedProperties(Action),

    #[error("missing query parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("unsupported query `{0}`")]
    UnknownQuery(String),

    #[error("missing file part")]
    MissingFile,

    #[error("uploaded file is empty")]
    EmptyFile,

    /// A backend-specific rejection, described in the backend's own words.
    #[error("{0}")]
    Rejected(String),
}

/// The item addressed by a request does not exist.
#[derive(Debug, thiserror::Error)]
#[error("`{url}` not found")]
pub struct NotFoundError {
    pub url: String,
}

impl NotFoundError {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_bad_request_into_micropub_error() {
        let err: MicropubError = BadRequestError::MissingType.into();
        assert!(matches!(
            err,
            MicropubError::BadRequest(BadRequestError::MissingType)
        ));
    }

    #[test]
    fn should_convert_not_found_into_micropub_error() {
        let err: MicropubError = NotFoundError::new("https://example.org/1").into();
        assert!(matches!(err, MicropubError::NotFound(_)));
    }

    #[test]
    fn should_describe_missing_url_with_action_name() {
        let err = BadRequestError::MissingUrl(Action::Undelete);
        assert_eq!(err.to_string(), "undelete requires a url");
    }

    #[test]
    fn should_describe_not_found_with_url() {
        let err = NotFoundError::new("https://example.org/1");
        assert_eq!(err.to_string(), "`https://example.org/1` not found");
    }

    #[test]
    fn should_keep_backend_source() {
        let err = MicropubError::backend("disk full");
        assert_eq!(err.to_string(), "backend error");
        assert_eq!(err.source().unwrap().to_string(), "disk full");
    }
}
