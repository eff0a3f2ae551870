//! Memory adapter error types.

use micropub_domain::error::{BadRequestError, MicropubError};

/// Errors specific to the in-memory backend.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// Another item already lives at the requested slug.
    #[error("an item already exists at `{0}`")]
    SlugTaken(String),

    /// The backend was handed a request for another action.
    #[error("expected a {expected} request")]
    UnexpectedRequest { expected: &'static str },

    /// Failed to render stored properties as JSON.
    #[error("failed to serialize item")]
    Serialize(#[source] serde_json::Error),
}

impl From<MemoryError> for MicropubError {
    fn from(err: MemoryError) -> Self {
        match err {
            err @ (MemoryError::SlugTaken(_) | MemoryError::UnexpectedRequest { .. }) => {
                BadRequestError::Rejected(err.to_string()).into()
            }
            other => Self::backend(other),
        }
    }
}
