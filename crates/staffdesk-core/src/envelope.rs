//! JSON response envelope shared by every endpoint.
//!
//! ```json
//! {"status": "success", "message": "...", "data": {...}, "pagination": {...}}
//! ```
//! `data` and `pagination` are omitted when not set.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use staffdesk_domain::pagination::PageMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct Envelope<D = ()> {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

impl Envelope<()> {
    /// Success envelope carrying only a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: None,
            pagination: None,
        }
    }
}

impl<D> Envelope<D> {
    pub fn with_data(message: impl Into<String>, data: D) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            data: Some(data),
            pagination: None,
        }
    }

    pub fn paginated(mut self, meta: PageMeta) -> Self {
        self.pagination = Some(meta);
        self
    }
}

impl<D: Serialize> IntoResponse for Envelope<D> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
