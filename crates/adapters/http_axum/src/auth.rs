//! Credential extraction from request headers.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use micropub_domain::auth::AuthContext;

/// Read a bearer token from the `Authorization` header.
///
/// The scheme is matched case-insensitively. A missing or non-bearer header
/// yields an anonymous context; the body may still carry `access_token`.
pub fn from_headers(headers: &HeaderMap) -> AuthContext {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .map_or_else(AuthContext::anonymous, AuthContext::bearer)
}
