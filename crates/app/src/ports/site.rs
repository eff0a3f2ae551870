//! Site configuration port: read-only settings advertised through queries.

use micropub_domain::site::{Channel, PostType, Syndication};

/// Read-only view of the site's Micropub settings.
///
/// Consulted for advertisement only, never for authorization.
pub trait SiteConfiguration {
    /// Public URL of the media endpoint, if the site has one.
    fn media_endpoint(&self) -> Option<String>;

    /// Syndication targets clients may pick from.
    fn syndicate_to(&self) -> Vec<Syndication>;

    /// Channels clients may post into.
    fn channels(&self) -> Vec<Channel>;

    /// Categories already in use on the site.
    fn categories(&self) -> Vec<String>;

    /// Post types the site supports.
    fn post_types(&self) -> Vec<PostType>;
}
