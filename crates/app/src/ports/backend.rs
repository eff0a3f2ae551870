//! Backend port: the content-management system behind the Micropub endpoint.
//!
//! One implementation is injected per deployment. The router treats it as
//! the authoritative, possibly slow, source of truth: every call is made at
//! most once per request and its errors are passed through untouched.
//!
//! Errors should be classified with the matching [`MicropubError`] variant
//! (`BadRequest`, `NotFound`, `NotImplemented`) so clients receive the right
//! status; anything else becomes a `server_error`.

use std::future::Future;

use serde_json::{Map, Value};

use micropub_domain::auth::{AuthContext, Scope};
use micropub_domain::error::MicropubError;
use micropub_domain::media::MediaFile;
use micropub_domain::request::Request;

/// Storage and authorization capabilities the router dispatches to.
pub trait Backend {
    /// Whether the credentials in `auth` grant `scope`.
    ///
    /// Must be side-effect free: the router calls it before any mutation and
    /// never retries it.
    fn has_scope(&self, auth: &AuthContext, scope: Scope) -> impl Future<Output = bool> + Send;

    /// Store an uploaded file and return its public URL.
    fn upload_media(
        &self,
        file: MediaFile,
    ) -> impl Future<Output = Result<String, MicropubError>> + Send;

    /// Canonical representation of the item at `url`, typically
    /// `{"type": [...], "properties": {...}}`.
    fn source(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Map<String, Value>, MicropubError>> + Send;

    /// Create a new item from a [`Request::Create`] and return its URL.
    fn create(&self, request: Request)
    -> impl Future<Output = Result<String, MicropubError>> + Send;

    /// Apply a [`Request::Update`] and return the item URL, which may have
    /// changed.
    fn update(&self, request: Request)
    -> impl Future<Output = Result<String, MicropubError>> + Send;

    /// Delete the item at `url`.
    fn delete(&self, url: &str) -> impl Future<Output = Result<(), MicropubError>> + Send;

    /// Restore the deleted item at `url`.
    fn undelete(&self, url: &str) -> impl Future<Output = Result<(), MicropubError>> + Send;
}
