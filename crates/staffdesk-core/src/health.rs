use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness only, never touches a backend.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
