//! Static implementation of [`SiteConfiguration`].

use micropub_app::ports::SiteConfiguration;
use micropub_domain::site::{Channel, PostType, Syndication};

/// Site settings fixed at startup, usually read from the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticSiteConfiguration {
    pub media_endpoint: Option<String>,
    pub syndicate_to: Vec<Syndication>,
    pub channels: Vec<Channel>,
    pub categories: Vec<String>,
    pub post_types: Vec<PostType>,
}

impl SiteConfiguration for StaticSiteConfiguration {
    fn media_endpoint(&self) -> Option<String> {
        self.media_endpoint.clone()
    }

    fn syndicate_to(&self) -> Vec<Syndication> {
        self.syndicate_to.clone()
    }

    fn channels(&self) -> Vec<Channel> {
        self.channels.clone()
    }

    fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    fn post_types(&self) -> Vec<PostType> {
        self.post_types.clone()
    }
}
