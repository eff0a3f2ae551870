//! Action resolution: turning a decoded body into a [`Request`].
//!
//! Every wire encoding decodes into the same loosely-typed [`RequestDraft`].
//! [`RequestDraft::resolve`] then decides which action the body represents
//! and checks that the fields that action needs are present. Resolution is
//! pure; it never talks to the backend.

use crate::action::Action;
use crate::error::BadRequestError;
use crate::media::Attachment;
use crate::request::{Commands, Properties, Request};

/// A decoded but not yet resolved request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDraft {
    /// Explicit action token, as sent.
    pub action: Option<String>,
    /// Microformat type, already prefixed (`h-entry`).
    pub kind: Option<String>,
    pub url: Option<String>,
    pub properties: Properties,
    pub commands: Commands,
    /// File parts of a multipart body.
    pub attachments: Vec<Attachment>,
}

/// A resolved request together with the files to store before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub request: Request,
    pub attachments: Vec<Attachment>,
}

impl From<Request> for Submission {
    fn from(request: Request) -> Self {
        Self {
            request,
            attachments: Vec::new(),
        }
    }
}

impl RequestDraft {
    /// Decide the action and build the matching [`Request`].
    ///
    /// `delete` and `undelete` tokens win; an `update` token or the presence
    /// of any update command means update; anything else is a create.
    ///
    /// # Errors
    ///
    /// Returns a [`BadRequestError`] when the action token is unknown, when
    /// the body has neither a type nor a url, when the action's required
    /// field is missing, or when files or plain properties accompany anything
    /// but a create.
    pub fn resolve(self) -> Result<Submission, BadRequestError> {
        let token = self.action.as_deref().map(str::parse::<Action>).transpose()?;
        let action = match token {
            Some(action @ (Action::Delete | Action::Undelete | Action::Update)) => action,
            _ if !self.commands.is_empty() => Action::Update,
            _ => Action::Create,
        };

        if self.kind.is_none() && self.url.is_none() {
            return Err(BadRequestError::MissingTypeAndUrl);
        }
        if action != Action::Create && !self.attachments.is_empty() {
            return Err(BadRequestError::UnexpectedAttachments(action));
        }
        if action != Action::Create && !self.properties.is_empty() {
            return Err(BadRequestError::UnexpectedProperties(action));
        }

        let request = match action {
            Action::Create => Request::Create {
                kind: self.kind.ok_or(BadRequestError::MissingType)?,
                properties: self.properties,
            },
            Action::Update => Request::Update {
                url: self.url.ok_or(BadRequestError::MissingUrl(action))?,
                commands: self.commands,
            },
            Action::Delete => Request::Delete {
                url: self.url.ok_or(BadRequestError::MissingUrl(action))?,
            },
            Action::Undelete => Request::Undelete {
                url: self.url.ok_or(BadRequestError::MissingUrl(action))?,
            },
        };

        Ok(Submission {
            request,
            attachments: self.attachments,
        })
    }
}
