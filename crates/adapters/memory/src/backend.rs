//! In-memory implementation of [`Backend`].

use std::collections::{HashMap, HashSet};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use micropub_app::ports::Backend;
use micropub_domain::auth::{AuthContext, Scope};
use micropub_domain::error::{BadRequestError, MicropubError, NotFoundError};
use micropub_domain::media::MediaFile;
use micropub_domain::request::{Properties, Request};

use crate::error::MemoryError;

/// Properties starting with this prefix are server commands, not content.
const COMMAND_PREFIX: &str = "mp-";

#[derive(Debug, Clone)]
struct Item {
    kind: String,
    properties: Properties,
    deleted: bool,
}

/// Backend keeping every item and media file in process memory.
///
/// Items live at `<base_url>/<slug>`, media at `<base_url>/media/<uuid>`.
/// Nothing survives a restart.
pub struct MemoryBackend {
    base_url: String,
    tokens: HashMap<String, HashSet<Scope>>,
    items: RwLock<HashMap<String, Item>>,
    media: RwLock<HashMap<String, MediaFile>>,
}

impl MemoryBackend {
    /// Create an empty backend publishing under `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: HashMap::new(),
            items: RwLock::new(HashMap::new()),
            media: RwLock::new(HashMap::new()),
        }
    }

    /// Grant `scopes` to the bearer of `token`.
    #[must_use]
    pub fn with_token(
        mut self,
        token: impl Into<String>,
        scopes: impl IntoIterator<Item = Scope>,
    ) -> Self {
        self.tokens
            .entry(token.into())
            .or_default()
            .extend(scopes);
        self
    }

    /// A stored media file, if `url` points at one.
    pub async fn media(&self, url: &str) -> Option<MediaFile> {
        self.media.read().await.get(url).cloned()
    }

    fn slug_for(properties: &Properties) -> String {
        properties
            .first_str("mp-slug")
            .map(slugify)
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

/// Lowercase, keep ASCII alphanumerics, collapse everything else into `-`.
fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

impl Backend for MemoryBackend {
    async fn has_scope(&self, auth: &AuthContext, scope: Scope) -> bool {
        auth.token()
            .and_then(|token| self.tokens.get(token))
            .is_some_and(|scopes| scopes.contains(&scope))
    }

    async fn upload_media(&self, file: MediaFile) -> Result<String, MicropubError> {
        if file.is_empty() {
            return Err(BadRequestError::EmptyFile.into());
        }
        let url = match file.extension() {
            Some(ext) => format!("{}/media/{}.{ext}", self.base_url, Uuid::new_v4()),
            None => format!("{}/media/{}", self.base_url, Uuid::new_v4()),
        };
        tracing::debug!(%url, size = file.bytes.len(), "storing media");
        self.media.write().await.insert(url.clone(), file);
        Ok(url)
    }

    async fn source(&self, url: &str) -> Result<Map<String, Value>, MicropubError> {
        let items = self.items.read().await;
        let item = items
            .get(url)
            .filter(|item| !item.deleted)
            .ok_or_else(|| NotFoundError::new(url))?;

        let properties = serde_json::to_value(&item.properties).map_err(MemoryError::Serialize)?;
        let mut document = Map::new();
        document.insert(
            "type".to_string(),
            Value::Array(vec![Value::String(item.kind.clone())]),
        );
        document.insert("properties".to_string(), properties);
        Ok(document)
    }

    async fn create(&self, request: Request) -> Result<String, MicropubError> {
        let Request::Create {
            kind,
            mut properties,
        } = request
        else {
            return Err(MemoryError::UnexpectedRequest { expected: "create" }.into());
        };

        let url = format!("{}/{}", self.base_url, Self::slug_for(&properties));
        properties.retain(|name| !name.starts_with(COMMAND_PREFIX));
        if !properties.contains("published") {
            properties.push(
                "published",
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }

        let mut items = self.items.write().await;
        if items.contains_key(&url) {
            return Err(MemoryError::SlugTaken(url).into());
        }
        items.insert(
            url.clone(),
            Item {
                kind,
                properties,
                deleted: false,
            },
        );
        Ok(url)
    }

    async fn update(&self, request: Request) -> Result<String, MicropubError> {
        let Request::Update { url, commands } = request else {
            return Err(MemoryError::UnexpectedRequest { expected: "update" }.into());
        };

        let mut items = self.items.write().await;
        let item = items
            .get_mut(&url)
            .filter(|item| !item.deleted)
            .ok_or_else(|| NotFoundError::new(&url))?;
        item.properties.apply(&commands);
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), MicropubError> {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(url)
            .filter(|item| !item.deleted)
            .ok_or_else(|| NotFoundError::new(url))?;
        item.deleted = true;
        Ok(())
    }

    async fn undelete(&self, url: &str) -> Result<(), MicropubError> {
        let mut items = self.items.write().await;
        let item = items.get_mut(url).ok_or_else(|| NotFoundError::new(url))?;
        item.deleted = false;
        Ok(())
    }
}
