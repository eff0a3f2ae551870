//! Action: which of the four Micropub operations a request performs.

use std::fmt;
use std::str::FromStr;

use crate::error::BadRequestError;

/// One of the four mutating Micropub operations.
///
/// The lowercase name doubles as the wire action token and as the OAuth
/// scope required to perform the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Delete,
    Undelete,
}

impl Action {
    /// Lowercase wire name (`"create"`, `"update"`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Undelete => "undelete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a wire action token. Case-sensitive, like the tokens clients send.
impl FromStr for Action {
    type Err = BadRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "undelete" => Ok(Self::Undelete),
            other => Err(BadRequestError::UnknownAction(other.to_string())),
        }
    }
}
