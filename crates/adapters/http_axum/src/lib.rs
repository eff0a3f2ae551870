//! # micropub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **Micropub endpoint**: `POST /micropub` for actions and
//!   `GET /micropub?q=…` for queries
//! - Serve the **media endpoint**: `POST /micropub/media`
//! - Decode form-urlencoded, multipart and JSON bodies into a
//!   [`RequestDraft`](micropub_domain::draft::RequestDraft) (driving adapter)
//! - Map service outcomes and errors into protocol responses: status,
//!   `Location` header, and the two-key JSON error body
//!
//! ## Dependency rule
//! Depends on `micropub-app` (for port traits and services) and
//! `micropub-domain` (for the request model and errors). Never leaks axum
//! types into the domain.

pub mod api;
pub mod auth;
pub mod error;
pub mod parse;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
