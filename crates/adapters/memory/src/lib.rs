//! # micropub-adapter-memory
//!
//! Process-local implementation of the driven ports, for development and
//! end-to-end tests.
//!
//! ## Responsibilities
//! - Implement [`Backend`](micropub_app::ports::Backend) with
//!   [`MemoryBackend`]: items and media kept in memory, scopes checked
//!   against a static token table
//! - Implement [`SiteConfiguration`](micropub_app::ports::SiteConfiguration)
//!   with [`StaticSiteConfiguration`] from plain values
//!
//! ## Dependency rule
//! Depends on `micropub-app` (for port traits) and `micropub-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod backend;
pub mod error;
pub mod site;

pub use backend::MemoryBackend;
pub use site::StaticSiteConfiguration;
