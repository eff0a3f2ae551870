//! # micropub-domain
//!
//! Pure domain model for a Micropub server.
//!
//! ## Responsibilities
//! - Define the **canonical action model**: a [`Request`](request::Request)
//!   is one of create, update, delete or undelete, each variant carrying
//!   only the fields that action needs
//! - Define **property maps** and the **update commands** (`replace`, `add`,
//!   `delete`) applied to them
//! - Resolve a loosely-typed [`RequestDraft`](draft::RequestDraft), as decoded
//!   from any wire encoding, into a `Request`
//! - Define the **error taxonomy** shared by every layer
//! - Define the read-only **site configuration** value types (syndication
//!   targets, channels, post types)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod action;
pub mod auth;
pub mod draft;
pub mod error;
pub mod media;
pub mod request;
pub mod site;
