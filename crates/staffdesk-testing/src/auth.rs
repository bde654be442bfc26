//! Bearer credential helpers for integration tests.

use http::header::AUTHORIZATION;
use http::{HeaderName, HeaderValue};

/// `Authorization: Bearer {token}` as a header pair.
pub fn bearer_header(token: &str) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .unwrap_or_else(|e| panic!("token is not a valid header value: {e}"));
    (AUTHORIZATION, value)
}
