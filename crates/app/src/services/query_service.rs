//! Query service: answers the configuration queries of `GET /micropub`.
//!
//! These answers only advertise what the site supports; they require no
//! scope and never reach the backend. `q=source` is the exception and lives
//! in [`MicropubService`](crate::services::micropub_service::MicropubService).

use serde::Serialize;

use micropub_domain::site::{Channel, PostType, Syndication};

use crate::ports::SiteConfiguration;

/// A parsed `q=` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Config,
    SyndicateTo,
    Channel,
    Category { search: Option<String> },
    PostTypes,
    Source { url: String, properties: Vec<String> },
}

impl Query {
    /// Every `q` value the endpoint answers, as advertised by `q=config`.
    pub const SUPPORTED: [&'static str; 6] = [
        "config",
        "syndicate-to",
        "channel",
        "category",
        "post-types",
        "source",
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::SyndicateTo => "syndicate-to",
            Self::Channel => "channel",
            Self::Category { .. } => "category",
            Self::PostTypes => "post-types",
            Self::Source { .. } => "source",
        }
    }
}

/// Body of `q=config`.
#[derive(Debug, Serialize)]
pub struct ConfigDocument {
    #[serde(rename = "media-endpoint", skip_serializing_if = "Option::is_none")]
    pub media_endpoint: Option<String>,
    #[serde(rename = "syndicate-to")]
    pub syndicate_to: Vec<Syndication>,
    pub channels: Vec<Channel>,
    pub categories: Vec<String>,
    #[serde(rename = "post-types")]
    pub post_types: Vec<PostType>,
    pub q: Vec<&'static str>,
}

/// Body of `q=syndicate-to`.
#[derive(Debug, Serialize)]
pub struct SyndicateToDocument {
    #[serde(rename = "syndicate-to")]
    pub syndicate_to: Vec<Syndication>,
}

/// Body of `q=channel`.
#[derive(Debug, Serialize)]
pub struct ChannelsDocument {
    pub channels: Vec<Channel>,
}

/// Body of `q=category`.
#[derive(Debug, Serialize)]
pub struct CategoriesDocument {
    pub categories: Vec<String>,
}

/// Body of `q=post-types`.
#[derive(Debug, Serialize)]
pub struct PostTypesDocument {
    #[serde(rename = "post-types")]
    pub post_types: Vec<PostType>,
}

/// Application service answering configuration queries.
pub struct QueryService<C> {
    site: C,
}

impl<C: SiteConfiguration> QueryService<C> {
    /// Create a new service reading from the given site configuration.
    pub fn new(site: C) -> Self {
        Self { site }
    }

    /// Everything a client needs to configure itself in one document.
    pub fn config(&self) -> ConfigDocument {
        ConfigDocument {
            media_endpoint: self.site.media_endpoint().filter(|url| !url.is_empty()),
            syndicate_to: self.site.syndicate_to(),
            channels: self.site.channels(),
            categories: self.site.categories(),
            post_types: self.site.post_types(),
            q: Query::SUPPORTED.to_vec(),
        }
    }

    pub fn syndicate_to(&self) -> SyndicateToDocument {
        SyndicateToDocument {
            syndicate_to: self.site.syndicate_to(),
        }
    }

    pub fn channels(&self) -> ChannelsDocument {
        ChannelsDocument {
            channels: self.site.channels(),
        }
    }

    /// Categories, optionally narrowed to those containing `search`
    /// (case-insensitive).
    pub fn categories(&self, search: Option<&str>) -> CategoriesDocument {
        let mut categories = self.site.categories();
        if let Some(search) = search.map(str::to_lowercase).filter(|s| !s.is_empty()) {
            categories.retain(|category| category.to_lowercase().contains(&search));
        }
        CategoriesDocument { categories }
    }

    pub fn post_types(&self) -> PostTypesDocument {
        PostTypesDocument {
            post_types: self.site.post_types(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct StubSite {
        media_endpoint: Option<String>,
    }

    impl SiteConfiguration for StubSite {
        fn media_endpoint(&self) -> Option<String> {
            self.media_endpoint.clone()
        }

        fn syndicate_to(&self) -> Vec<Syndication> {
            vec![Syndication {
                uid: "https://social.example/@me".to_string(),
                name: "Social".to_string(),
            }]
        }

        fn channels(&self) -> Vec<Channel> {
            vec![Channel {
                uid: "notes".to_string(),
                name: "Notes".to_string(),
            }]
        }

        fn categories(&self) -> Vec<String> {
            vec!["Rust".to_string(), "indieweb".to_string(), "trust".to_string()]
        }

        fn post_types(&self) -> Vec<PostType> {
            vec![PostType {
                kind: "note".to_string(),
                name: "Note".to_string(),
                properties: vec![],
                required_properties: vec![],
            }]
        }
    }

    fn service(media_endpoint: Option<&str>) -> QueryService<StubSite> {
        QueryService::new(StubSite {
            media_endpoint: media_endpoint.map(str::to_string),
        })
    }

    #[test]
    fn should_render_full_config_document() {
        let config = service(Some("https://example.org/micropub/media")).config();

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "media-endpoint": "https://example.org/micropub/media",
                "syndicate-to": [{"uid": "https://social.example/@me", "name": "Social"}],
                "channels": [{"uid": "notes", "name": "Notes"}],
                "categories": ["Rust", "indieweb", "trust"],
                "post-types": [{"type": "note", "name": "Note"}],
                "q": ["config", "syndicate-to", "channel", "category", "post-types", "source"],
            })
        );
    }

    #[test]
    fn should_omit_missing_or_empty_media_endpoint() {
        for endpoint in [None, Some("")] {
            let value = serde_json::to_value(service(endpoint).config()).unwrap();
            assert!(value.get("media-endpoint").is_none());
        }
    }

    #[test]
    fn should_filter_categories_case_insensitively() {
        let categories = service(None).categories(Some("RUST")).categories;
        assert_eq!(categories, vec!["Rust".to_string(), "trust".to_string()]);
    }

    #[test]
    fn should_return_all_categories_for_empty_search() {
        assert_eq!(service(None).categories(Some("")).categories.len(), 3);
        assert_eq!(service(None).categories(None).categories.len(), 3);
    }

    #[test]
    fn should_wrap_single_key_documents() {
        let service = service(None);
        assert_eq!(
            serde_json::to_value(service.syndicate_to()).unwrap()["syndicate-to"][0]["name"],
            json!("Social")
        );
        assert_eq!(
            serde_json::to_value(service.channels()).unwrap()["channels"][0]["uid"],
            json!("notes")
        );
        assert_eq!(
            serde_json::to_value(service.post_types()).unwrap()["post-types"][0]["type"],
            json!("note")
        );
    }

    #[test]
    fn should_name_every_supported_query() {
        let queries = [
            Query::Config,
            Query::SyndicateTo,
            Query::Channel,
            Query::Category { search: None },
            Query::PostTypes,
            Query::Source {
                url: String::new(),
                properties: vec![],
            },
        ];
        let names: Vec<_> = queries.iter().map(Query::name).collect();
        assert_eq!(names, Query::SUPPORTED.to_vec());
    }
}
