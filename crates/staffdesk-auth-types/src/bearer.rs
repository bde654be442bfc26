//! `Authorization: Bearer` header parsing.

use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;

/// Raw bearer credential from the `Authorization` header, if any.
///
/// Returns `None` when the header is absent, not a `Bearer` scheme, or empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_owned())
        .filter(|token| !token.is_empty())
}
