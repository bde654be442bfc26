use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{FRONTEND_DIVISION, TestApp};

fn names(json: &Value) -> Vec<String> {
    json["data"]["divisions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn should_list_divisions_in_natural_order() {
    let app = TestApp::new().await;
    let response = app.get("/api/divisions", &[]).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "success");
    assert_eq!(
        names(&json),
        ["Mobile Apps", "QA", "Full Stack", "Backend", "Frontend", "UI/UX Designer"]
    );
    assert_eq!(
        json["pagination"],
        json!({
            "current_page": 1,
            "last_page": 1,
            "per_page": 10,
            "total": 6,
            "from": 1,
            "to": 6,
        })
    );
}

#[tokio::test]
async fn should_filter_by_name_prefix() {
    let app = TestApp::new().await;
    let json = app
        .get("/api/divisions", &[("name", "Front")])
        .await
        .json::<Value>();
    assert_eq!(json["data"]["divisions"][0]["id"], FRONTEND_DIVISION);
    assert_eq!(names(&json), ["Frontend"]);
    assert_eq!(
        json["pagination"],
        json!({
            "current_page": 1,
            "last_page": 1,
            "per_page": 10,
            "total": 1,
            "from": 1,
            "to": 1,
        })
    );
}

#[tokio::test]
async fn should_match_substring_ignoring_case() {
    let app = TestApp::new().await;
    let json = app
        .get("/api/divisions", &[("name", "ui/ux")])
        .await
        .json::<Value>();
    assert_eq!(names(&json), ["UI/UX Designer"]);

    let json = app
        .get("/api/divisions", &[("name", "END")])
        .await
        .json::<Value>();
    assert_eq!(names(&json), ["Backend", "Frontend"]);
}

#[tokio::test]
async fn should_treat_empty_name_as_match_all() {
    let app = TestApp::new().await;
    let json = app
        .get("/api/divisions", &[("name", "")])
        .await
        .json::<Value>();
    assert_eq!(json["pagination"]["total"], 6);
}

#[tokio::test]
async fn should_return_empty_page_with_null_bounds() {
    let app = TestApp::new().await;
    let json = app
        .get("/api/divisions", &[("name", "Accounting")])
        .await
        .json::<Value>();
    assert_eq!(json["data"]["divisions"], json!([]));
    assert_eq!(json["pagination"]["total"], 0);
    assert_eq!(json["pagination"]["last_page"], 1);
    assert_eq!(json["pagination"]["from"], Value::Null);
    assert_eq!(json["pagination"]["to"], Value::Null);
}

#[tokio::test]
async fn should_fall_back_to_first_page_for_bad_page_values() {
    let app = TestApp::new().await;
    for page in ["0", "-3", "abc"] {
        let json = app
            .get("/api/divisions", &[("page", page)])
            .await
            .json::<Value>();
        assert_eq!(json["pagination"]["current_page"], 1, "{page}");
    }
    let json = app
        .get("/api/divisions", &[("page", "2")])
        .await
        .json::<Value>();
    assert_eq!(json["pagination"]["current_page"], 2);
    assert_eq!(json["data"]["divisions"], json!([]));
}
