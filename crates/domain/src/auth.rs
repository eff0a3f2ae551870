//! Caller credentials and the scopes they may grant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// An OAuth scope the router asks the backend about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Create,
    Update,
    Delete,
    Undelete,
    Media,
}

impl Scope {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Undelete => "undelete",
            Self::Media => "media",
        }
    }
}

impl From<Action> for Scope {
    fn from(action: Action) -> Self {
        match action {
            Action::Create => Self::Create,
            Action::Update => Self::Update,
            Action::Delete => Self::Delete,
            Action::Undelete => Self::Undelete,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials presented with a request.
///
/// The router never validates the token itself; it hands the context to the
/// backend's scope check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    /// A request without any credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A request carrying a bearer token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// The bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Fill in a token found elsewhere (e.g. an `access_token` body field)
    /// when none was presented in the header.
    #[must_use]
    pub fn or_token(self, token: Option<String>) -> Self {
        match self.token {
            Some(_) => self,
            None => Self { token },
        }
    }
}
