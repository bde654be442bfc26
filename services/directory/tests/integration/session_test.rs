use axum::http::StatusCode;
use serde_json::{Value, json};

use staffdesk_testing::auth::bearer_header;

use crate::helpers::{ADMIN_PASSWORD, TestApp, login};

// ── POST /api/login ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_log_in_and_return_public_admin_fields() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/login")
        .json(&json!({ "username": "admin", "password": ADMIN_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "success");
    assert!(json["data"]["token"].as_str().unwrap().contains('|'));
    let admin = &json["data"]["admin"];
    assert_eq!(admin["username"], "admin");
    assert_eq!(admin["name"], "Administrator");
    assert!(admin.get("password").is_none());
    assert!(admin.get("password_hash").is_none());
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let app = TestApp::new().await;
    let response = app
        .server
        .post("/api/login")
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "error");
    assert_eq!(json["kind"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn should_require_username_and_password() {
    let app = TestApp::new().await;
    let response = app.server.post("/api/login").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json::<Value>();
    assert_eq!(json["errors"]["username"], "Username is required");
    assert_eq!(json["errors"]["password"], "Password is required");
}

#[tokio::test]
async fn should_refuse_login_while_authenticated() {
    let app = TestApp::new().await;
    let (name, value) = bearer_header(&app.token);
    let response = app
        .server
        .post("/api/login")
        .add_header(name, value)
        .json(&json!({ "username": "admin", "password": ADMIN_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "ALREADY_AUTHENTICATED");
}

#[tokio::test]
async fn should_allow_login_with_stale_token() {
    let app = TestApp::new().await;
    let (name, value) = bearer_header("00000000-0000-0000-0000-000000000000|stale");
    let response = app
        .server
        .post("/api/login")
        .add_header(name, value)
        .json(&json!({ "username": "admin", "password": ADMIN_PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

// ── POST /api/logout ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_revoke_token_on_logout() {
    let app = TestApp::new().await;
    assert_eq!(
        app.get("/api/divisions", &[]).await.status_code(),
        StatusCode::OK
    );

    let (name, value) = bearer_header(&app.token);
    let response = app.server.post("/api/logout").add_header(name, value).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Logout successful");

    let after = app.get("/api/divisions", &[]).await;
    assert_eq!(after.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(after.json::<Value>()["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_keep_other_sessions_on_logout() {
    let app = TestApp::new().await;
    let second = login(&app.server, "admin", ADMIN_PASSWORD).await;
    let (name, value) = bearer_header(&second);
    app.server.post("/api/logout").add_header(name, value).await;
    assert_eq!(
        app.get("/api/divisions", &[]).await.status_code(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn should_require_token_for_protected_routes() {
    let app = TestApp::new().await;
    for path in ["/api/divisions", "/api/employees", "/api/me"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
    }
    let response = app.server.post("/api/logout").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let response = app.server.delete("/api/employees/anything").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ── GET /api/me ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_current_admin() {
    let app = TestApp::new().await;
    let json = app.get("/api/me", &[]).await.json::<Value>();
    assert_eq!(json["data"]["admin"]["username"], "admin");
    assert_eq!(json["data"]["admin"]["email"], "admin@example.com");
}

// ── health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_live_and_ready() {
    let app = TestApp::new().await;
    assert_eq!(app.server.get("/healthz").await.status_code(), StatusCode::OK);
    assert_eq!(app.server.get("/readyz").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn should_echo_request_id() {
    let app = TestApp::new().await;
    let response = app.server.get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(id.to_str().unwrap().parse::<uuid::Uuid>().is_ok());
}
