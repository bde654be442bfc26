use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::{Value, json};

use staffdesk_testing::fixture;

use crate::helpers::{
    APP_URL, BACKEND_DIVISION, FRONTEND_DIVISION, JOHN_DOE, TestApp, employee_form, full_fields,
    image_part,
};

fn png_part() -> axum_test::multipart::Part {
    image_part(fixture::png_bytes(), "photo.png", "image/png")
}

async fn total(app: &TestApp) -> u64 {
    app.get("/api/employees", &[])
        .await
        .json::<Value>()["pagination"]["total"]
        .as_u64()
        .unwrap()
}

/// Create an employee and return its listing entry.
async fn create(app: &TestApp, name: &str) -> Value {
    let response = app
        .post_form("/api/employees", employee_form(&full_fields(name), Some(png_part())))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    app.all_employees(&[("name", name)])
        .await
        .into_iter()
        .find(|e| e["name"] == name)
        .unwrap()
}

// ── GET /api/employees ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_employees_with_division_and_photo_url() {
    let app = TestApp::new().await;
    let response = app.get("/api/employees", &[]).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let json = response.json::<Value>();
    assert_eq!(json["message"], "Employees retrieved successfully");
    assert_eq!(json["data"]["employees"].as_array().unwrap().len(), 10);
    assert_eq!(
        json["pagination"],
        json!({
            "current_page": 1,
            "last_page": 2,
            "per_page": 10,
            "total": 12,
            "from": 1,
            "to": 10,
        })
    );
    let first = &json["data"]["employees"][0];
    assert_eq!(first["id"], JOHN_DOE);
    assert_eq!(first["division"]["id"], BACKEND_DIVISION);
    assert_eq!(first["division"]["name"], "Backend");
    assert_eq!(first["image"], "https://i.pravatar.cc/150?img=1");
}

#[tokio::test]
async fn should_cover_every_employee_exactly_once_across_pages() {
    let app = TestApp::new().await;
    let all = app.all_employees(&[]).await;
    assert_eq!(all.len(), 12);
    let ids: HashSet<_> = all.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 12);
}

#[tokio::test]
async fn should_return_empty_page_for_huge_page_number() {
    let app = TestApp::new().await;
    for page in ["1000000000000000000", "18446744073709551615"] {
        let response = app.get("/api/employees", &[("page", page)]).await;
        assert_eq!(response.status_code(), StatusCode::OK, "{page}");
        let json = response.json::<Value>();
        assert_eq!(json["data"]["employees"], json!([]));
        assert_eq!(json["pagination"]["total"], 12);
        assert_eq!(json["pagination"]["from"], Value::Null);
    }
}

#[tokio::test]
async fn should_find_john_doe_by_any_case_insensitive_substring() {
    let app = TestApp::new().await;
    for term in ["doe", "JOHN", "n do"] {
        let json = app
            .get("/api/employees", &[("name", term)])
            .await
            .json::<Value>();
        let ids: Vec<_> = json["data"]["employees"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap().to_owned())
            .collect();
        assert!(ids.contains(&JOHN_DOE.to_owned()), "{term}");
    }
}

#[tokio::test]
async fn should_filter_by_division() {
    let app = TestApp::new().await;
    let json = app
        .get("/api/employees", &[("division_id", BACKEND_DIVISION)])
        .await
        .json::<Value>();
    let names: Vec<_> = json["data"]["employees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["John Doe", "Robert Martinez"]);
}

#[tokio::test]
async fn should_combine_name_and_division_filters() {
    let app = TestApp::new().await;
    let json = app
        .get(
            "/api/employees",
            &[("name", "doe"), ("division_id", FRONTEND_DIVISION)],
        )
        .await
        .json::<Value>();
    assert_eq!(json["pagination"]["total"], 0);
}

#[tokio::test]
async fn should_match_nothing_for_empty_or_unknown_division() {
    let app = TestApp::new().await;
    for division in ["", "not-a-uuid", "00000000-0000-0000-0000-000000000000"] {
        let json = app
            .get("/api/employees", &[("division_id", division)])
            .await
            .json::<Value>();
        assert_eq!(json["pagination"]["total"], 0, "{division}");
        assert_eq!(json["data"]["employees"], json!([]));
    }
}

// ── POST /api/employees ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_employee_and_store_photo() {
    let app = TestApp::new().await;
    let before = total(&app).await;

    let response = app
        .post_form(
            "/api/employees",
            employee_form(&full_fields("Ada Lovelace"), Some(png_part())),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Employee created successfully");
    assert_eq!(total(&app).await, before + 1);

    let created = app
        .all_employees(&[("name", "Ada Lovelace")])
        .await
        .pop()
        .unwrap();
    assert_eq!(created["division"]["name"], "Backend");
    assert_eq!(created["position"], "Platform Engineer");
    let url = created["image"].as_str().unwrap();
    assert!(url.starts_with(&format!("{APP_URL}/storage/employees/")));
    assert!(url.ends_with(".png"));
    let path = app.stored_path(url);
    assert_eq!(std::fs::read(&path).unwrap(), fixture::png_bytes());

    // The newest employee sorts last.
    let all = app.all_employees(&[]).await;
    assert_eq!(all.last().unwrap()["name"], "Ada Lovelace");
}

#[tokio::test]
async fn should_serve_stored_photo() {
    let app = TestApp::new().await;
    let created = create(&app, "Grace Hopper").await;
    let url = created["image"].as_str().unwrap();
    let path = url.strip_prefix(APP_URL).unwrap();
    let response = app.server.get(path).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.as_bytes().to_vec(), fixture::png_bytes());
}

#[tokio::test]
async fn should_enumerate_every_missing_field() {
    let app = TestApp::new().await;
    let before = total(&app).await;
    let response = app
        .post_form("/api/employees", employee_form(&[], None))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response.json::<Value>();
    assert_eq!(json["kind"], "VALIDATION_FAILED");
    assert_eq!(
        json["errors"],
        json!({
            "name": "Name is required",
            "phone": "Phone number is required",
            "division": "Division must be selected",
            "position": "Position is required",
            "image": "Photo is required",
        })
    );
    assert_eq!(total(&app).await, before);
}

#[tokio::test]
async fn should_report_only_the_invalid_fields() {
    let app = TestApp::new().await;
    let fields = [
        ("name", "Ada Lovelace"),
        ("phone", "081200000000"),
        ("division", "00000000-0000-0000-0000-000000000000"),
        ("position", "  "),
    ];
    let response = app
        .post_form("/api/employees", employee_form(&fields, Some(png_part())))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let errors = response.json::<Value>()["errors"].clone();
    assert_eq!(
        errors,
        json!({
            "division": "Division not found",
            "position": "Position is required",
        })
    );
}

#[tokio::test]
async fn should_reject_bad_photos() {
    let app = TestApp::new().await;
    let cases = [
        (
            image_part(fixture::text_bytes(), "notes.png", "image/png"),
            "The file must be an image",
        ),
        (
            image_part(fixture::webp_bytes(), "photo.webp", "image/webp"),
            "Image format must be jpeg, png, jpg, or gif",
        ),
        (
            image_part(fixture::oversized_png_bytes(), "huge.png", "image/png"),
            "Image size may not exceed 2MB",
        ),
    ];
    for (part, message) in cases {
        let response = app
            .post_form(
                "/api/employees",
                employee_form(&full_fields("Ada Lovelace"), Some(part)),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["errors"]["image"], message);
    }
    assert_eq!(std::fs::read_dir(app.storage.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn should_accept_gif_and_jpeg_photos() {
    let app = TestApp::new().await;
    for (bytes, file_name, ext) in [
        (fixture::gif_bytes(), "a.gif", ".gif"),
        (fixture::jpeg_bytes(), "b.jpeg", ".jpg"),
    ] {
        let name = format!("Photo {ext}");
        let response = app
            .post_form(
                "/api/employees",
                employee_form(
                    &full_fields(&name),
                    Some(image_part(bytes, file_name, "application/octet-stream")),
                ),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let created = app.all_employees(&[("name", name.as_str())]).await.pop().unwrap();
        assert!(created["image"].as_str().unwrap().ends_with(ext));
    }
}

// ── PUT|POST /api/employees/{id} ─────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_unknown_employee() {
    let app = TestApp::new().await;
    for id in ["00000000-0000-0000-0000-000000000000", "not-a-uuid"] {
        let response = app
            .post_form(
                &format!("/api/employees/{id}"),
                employee_form(&[("name", "")], None),
            )
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{id}");
        assert_eq!(response.json::<Value>()["kind"], "EMPLOYEE_NOT_FOUND");

        let response = app.delete(&format!("/api/employees/{id}")).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{id}");
    }
    assert_eq!(total(&app).await, 12);
}

#[tokio::test]
async fn should_update_only_supplied_fields_via_method_override() {
    let app = TestApp::new().await;
    let response = app
        .post_form(
            &format!("/api/employees/{JOHN_DOE}"),
            employee_form(&[("_method", "PUT"), ("position", "Principal Engineer")], None),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>()["message"],
        "Employee updated successfully"
    );

    let john = app.employee(JOHN_DOE).await.unwrap();
    assert_eq!(john["position"], "Principal Engineer");
    assert_eq!(john["name"], "John Doe");
    assert_eq!(john["division"]["id"], BACKEND_DIVISION);
    assert_eq!(john["image"], "https://i.pravatar.cc/150?img=1");
}

#[tokio::test]
async fn should_update_with_put_and_move_division() {
    let app = TestApp::new().await;
    let (name, value) = staffdesk_testing::auth::bearer_header(&app.token);
    let response = app
        .server
        .put(&format!("/api/employees/{JOHN_DOE}"))
        .add_header(name, value)
        .multipart(employee_form(&[("division", FRONTEND_DIVISION)], None))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let john = app.employee(JOHN_DOE).await.unwrap();
    assert_eq!(john["division"]["name"], "Frontend");
}

#[tokio::test]
async fn should_reject_invalid_update_without_changing_record() {
    let app = TestApp::new().await;
    let response = app
        .post_form(
            &format!("/api/employees/{JOHN_DOE}"),
            employee_form(
                &[("name", "Johnny"), ("division", "00000000-0000-0000-0000-000000000000")],
                None,
            ),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.json::<Value>()["errors"],
        json!({ "division": "Division not found" })
    );
    let john = app.employee(JOHN_DOE).await.unwrap();
    assert_eq!(john["name"], "John Doe");
}

#[tokio::test]
async fn should_replace_photo_and_remove_previous_file() {
    let app = TestApp::new().await;
    let created = create(&app, "Ada Lovelace").await;
    let id = created["id"].as_str().unwrap();
    let old_path = app.stored_path(created["image"].as_str().unwrap());
    assert!(old_path.exists());

    let response = app
        .post_form(
            &format!("/api/employees/{id}"),
            employee_form(
                &[],
                Some(image_part(fixture::gif_bytes(), "new.gif", "image/gif")),
            ),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let updated = app.employee(id).await.unwrap();
    let new_path = app.stored_path(updated["image"].as_str().unwrap());
    assert_ne!(new_path, old_path);
    assert!(new_path.exists());
    assert!(!old_path.exists());
}

// ── DELETE /api/employees/{id} ───────────────────────────────────────────────

#[tokio::test]
async fn should_delete_employee_and_photo() {
    let app = TestApp::new().await;
    let created = create(&app, "Ada Lovelace").await;
    let id = created["id"].as_str().unwrap().to_owned();
    let path = app.stored_path(created["image"].as_str().unwrap());
    let before = total(&app).await;

    let response = app.delete(&format!("/api/employees/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>()["message"],
        "Employee deleted successfully"
    );
    assert_eq!(total(&app).await, before - 1);
    assert!(app.employee(&id).await.is_none());
    assert!(!path.exists());

    let again = app.delete(&format!("/api/employees/{id}")).await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_delete_seeded_employee_with_remote_photo() {
    let app = TestApp::new().await;
    let response = app.delete(&format!("/api/employees/{JOHN_DOE}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(total(&app).await, 11);
}
