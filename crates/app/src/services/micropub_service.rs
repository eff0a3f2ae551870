//! Micropub service: the authorization gate and dispatcher.
//!
//! Every resolved request goes through exactly one scope check and, when
//! allowed, exactly one backend operation. Backend errors come back to the
//! caller unchanged; nothing here retries.

use serde_json::{Map, Value};

use micropub_domain::auth::{AuthContext, Scope};
use micropub_domain::draft::Submission;
use micropub_domain::error::MicropubError;
use micropub_domain::media::MediaFile;
use micropub_domain::request::Request;

use crate::ports::Backend;

/// Successful result of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new item lives at this URL.
    Created(String),
    /// The item now lives at this URL.
    Updated(String),
    Deleted,
    Undeleted,
}

/// Application service that authorizes and dispatches Micropub operations.
pub struct MicropubService<B> {
    backend: B,
}

impl<B: Backend> MicropubService<B> {
    /// Create a new service dispatching to the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The injected backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Authorize and dispatch a resolved request.
    ///
    /// The scope named after the action is checked once. Attachments of a
    /// create are stored through [`Backend::upload_media`] first, in order,
    /// and their URLs appended to the property they were submitted under.
    ///
    /// # Errors
    ///
    /// Returns [`MicropubError::InsufficientScope`] when the scope is not
    /// granted (the backend is then never asked to mutate anything), or the
    /// backend's own error.
    pub async fn submit(
        &self,
        auth: &AuthContext,
        submission: Submission,
    ) -> Result<Outcome, MicropubError> {
        let Submission {
            request,
            attachments,
        } = submission;
        let action = request.action();
        self.authorize(auth, &[Scope::from(action)]).await?;

        tracing::debug!(%action, url = request.url(), "dispatching micropub request");
        match request {
            Request::Create {
                kind,
                mut properties,
            } => {
                for attachment in attachments {
                    let url = self.backend.upload_media(attachment.file).await?;
                    tracing::debug!(property = %attachment.property, %url, "stored attachment");
                    properties.push(attachment.property, url);
                }
                let url = self
                    .backend
                    .create(Request::Create { kind, properties })
                    .await?;
                tracing::info!(%url, "created item");
                Ok(Outcome::Created(url))
            }
            request @ Request::Update { .. } => {
                let url = self.backend.update(request).await?;
                tracing::info!(%url, "updated item");
                Ok(Outcome::Updated(url))
            }
            Request::Delete { url } => {
                self.backend.delete(&url).await?;
                tracing::info!(%url, "deleted item");
                Ok(Outcome::Deleted)
            }
            Request::Undelete { url } => {
                self.backend.undelete(&url).await?;
                tracing::info!(%url, "undeleted item");
                Ok(Outcome::Undeleted)
            }
        }
    }

    /// Store a file posted to the media endpoint and return its URL.
    ///
    /// Requires the `media` scope, or `create` for clients that were only
    /// granted that.
    ///
    /// # Errors
    ///
    /// Returns [`MicropubError::InsufficientScope`] or the backend's error.
    pub async fn upload_media(
        &self,
        auth: &AuthContext,
        file: MediaFile,
    ) -> Result<String, MicropubError> {
        self.authorize(auth, &[Scope::Media, Scope::Create]).await?;
        let url = self.backend.upload_media(file).await?;
        tracing::info!(%url, "stored media");
        Ok(url)
    }

    /// Answer a `q=source` query.
    ///
    /// With no `properties` the backend's representation is returned as is.
    /// Otherwise only `{"properties": {...}}` restricted to the requested
    /// names is returned.
    ///
    /// # Errors
    ///
    /// Returns [`MicropubError::InsufficientScope`] unless `update` or
    /// `create` is granted, or the backend's error.
    pub async fn source(
        &self,
        auth: &AuthContext,
        url: &str,
        properties: &[String],
    ) -> Result<Map<String, Value>, MicropubError> {
        self.authorize(auth, &[Scope::Update, Scope::Create]).await?;
        let mut item = self.backend.source(url).await?;
        if properties.is_empty() {
            return Ok(item);
        }

        let mut selected = match item.remove("properties") {
            Some(Value::Object(props)) => props,
            _ => Map::new(),
        };
        selected.retain(|name, _| properties.iter().any(|wanted| wanted == name));

        let mut filtered = Map::new();
        filtered.insert("properties".to_string(), Value::Object(selected));
        Ok(filtered)
    }

    /// Succeeds as soon as one of `scopes` is granted, checking them in order.
    async fn authorize(&self, auth: &AuthContext, scopes: &[Scope]) -> Result<(), MicropubError> {
        for &scope in scopes {
            if self.backend.has_scope(auth, scope).await {
                return Ok(());
            }
        }
        tracing::warn!(?scopes, "insufficient scope");
        Err(MicropubError::InsufficientScope)
    }
}
