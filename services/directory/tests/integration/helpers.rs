use std::path::PathBuf;

use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};
use tempfile::TempDir;

use staffdesk_directory::infra::backend::Backend;
use staffdesk_directory::infra::memory::MemoryStore;
use staffdesk_directory::infra::storage::LocalImageStore;
use staffdesk_directory::router::build_router;
use staffdesk_directory::state::AppState;
use staffdesk_testing::auth::bearer_header;

pub const APP_URL: &str = "http://localhost:8000";
pub const ADMIN_PASSWORD: &str = "password";

pub const BACKEND_DIVISION: &str = "550e8400-e29b-41d4-a716-446655440001";
pub const FRONTEND_DIVISION: &str = "550e8400-e29b-41d4-a716-446655440002";
pub const JOHN_DOE: &str = "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d";

/// A server over the seeded in-memory store with images in a scratch directory.
pub struct TestApp {
    pub server: TestServer,
    pub storage: TempDir,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let storage = tempfile::tempdir().unwrap();
        let state = AppState {
            backend: Backend::Memory(MemoryStore::demo(ADMIN_PASSWORD).unwrap()),
            images: LocalImageStore::new(storage.path(), APP_URL),
            token_ttl: None,
        };
        let server = TestServer::new(build_router(state)).unwrap();
        let token = login(&server, "admin", ADMIN_PASSWORD).await;
        Self {
            server,
            storage,
            token,
        }
    }

    /// GET with the admin's bearer token and the given query pairs.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> axum_test::TestResponse {
        let (name, value) = bearer_header(&self.token);
        let mut request = self.server.get(path).add_header(name, value);
        for (key, val) in query {
            request = request.add_query_param(key, val);
        }
        request.await
    }

    pub async fn post_form(&self, path: &str, form: MultipartForm) -> axum_test::TestResponse {
        let (name, value) = bearer_header(&self.token);
        self.server
            .post(path)
            .add_header(name, value)
            .multipart(form)
            .await
    }

    pub async fn delete(&self, path: &str) -> axum_test::TestResponse {
        let (name, value) = bearer_header(&self.token);
        self.server.delete(path).add_header(name, value).await
    }

    /// Every employee across all pages, in list order.
    pub async fn all_employees(&self, query: &[(&str, &str)]) -> Vec<Value> {
        let mut employees = Vec::new();
        let mut page = 1;
        loop {
            let page_str = page.to_string();
            let mut pairs = query.to_vec();
            pairs.push(("page", &page_str));
            let json = self.get("/api/employees", &pairs).await.json::<Value>();
            employees.extend(json["data"]["employees"].as_array().unwrap().iter().cloned());
            if page >= json["pagination"]["last_page"].as_u64().unwrap() {
                break;
            }
            page += 1;
        }
        employees
    }

    pub async fn employee(&self, id: &str) -> Option<Value> {
        self.all_employees(&[])
            .await
            .into_iter()
            .find(|e| e["id"] == id)
    }

    /// Filesystem path behind a public image URL.
    pub fn stored_path(&self, url: &str) -> PathBuf {
        let reference = url
            .strip_prefix(&format!("{APP_URL}/storage/"))
            .unwrap_or_else(|| panic!("not a local image url: {url}"));
        self.storage.path().join(reference)
    }
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    let json = response.json::<Value>();
    json["data"]["token"]
        .as_str()
        .unwrap_or_else(|| panic!("login failed: {json}"))
        .to_owned()
}

pub fn image_part(bytes: Vec<u8>, file_name: &str, mime: &str) -> Part {
    Part::bytes(bytes).file_name(file_name).mime_type(mime)
}

/// Multipart body with the given text fields and an optional photo.
pub fn employee_form(fields: &[(&str, &str)], image: Option<Part>) -> MultipartForm {
    let mut form = MultipartForm::new();
    for (name, value) in fields {
        form = form.add_text(name.to_string(), value.to_string());
    }
    if let Some(part) = image {
        form = form.add_part("image", part);
    }
    form
}

pub fn full_fields(name: &str) -> Vec<(&str, &str)> {
    vec![
        ("name", name),
        ("phone", "081200000000"),
        ("division", BACKEND_DIVISION),
        ("position", "Platform Engineer"),
    ]
}
