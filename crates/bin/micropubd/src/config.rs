//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `micropub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use micropub_adapter_http_axum::state::DEFAULT_BODY_LIMIT;
use micropub_adapter_memory::StaticSiteConfiguration;
use micropub_domain::auth::Scope;
use micropub_domain::site::{Channel, PostType, Syndication};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Site settings advertised to clients.
    pub site: SiteConfig,
    /// Bearer tokens accepted by the in-memory backend.
    pub tokens: Vec<TokenConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Largest request body accepted, in bytes.
    pub body_limit: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public URL items are published under.
    pub base_url: String,
    /// Public URL of the media endpoint. Defaults to `<base_url>/micropub/media`.
    pub media_endpoint: Option<String>,
    pub categories: Vec<String>,
    pub syndicate_to: Vec<Syndication>,
    pub channels: Vec<Channel>,
    pub post_types: Vec<PostType>,
}

/// A bearer token and the scopes it grants.
#[derive(Debug, Deserialize)]
pub struct TokenConfig {
    pub token: String,
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

impl Config {
    /// Load configuration from `micropub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("micropub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MICROPUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("MICROPUB_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("MICROPUB_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("MICROPUB_BASE_URL") {
            self.site.base_url = val;
        }
        if let Ok(val) = std::env::var("MICROPUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.server.body_limit == 0 {
            return Err(ConfigError::Validation(
                "body_limit must be positive".to_string(),
            ));
        }
        if self.site.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Site settings for the query service.
    #[must_use]
    pub fn site_configuration(&self) -> StaticSiteConfiguration {
        let media_endpoint = self.site.media_endpoint.clone().unwrap_or_else(|| {
            format!("{}/micropub/media", self.site.base_url.trim_end_matches('/'))
        });
        StaticSiteConfiguration {
            media_endpoint: Some(media_endpoint),
            syndicate_to: self.site.syndicate_to.clone(),
            channels: self.site.channels.clone(),
            categories: self.site.categories.clone(),
            post_types: self.site.post_types.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "micropubd=info,micropub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            media_endpoint: None,
            categories: Vec::new(),
            syndicate_to: Vec::new(),
            channels: Vec::new(),
            post_types: Vec::new(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
