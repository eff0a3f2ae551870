//! # micropub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Backend` — scope checks, media storage, and the create / update /
//!     delete / undelete / source operations
//!   - `SiteConfiguration` — read-only site settings advertised to clients
//! - Define **driving/inbound ports** as use-case structs:
//!   - `MicropubService` — authorization gate and dispatcher for resolved
//!     requests, media uploads and source queries
//!   - `QueryService` — configuration queries (`q=config`, `q=category`, …)
//!
//! ## Dependency rule
//! Depends on `micropub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
