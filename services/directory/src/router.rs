use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use staffdesk_core::health::healthz;
use staffdesk_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    division::list_divisions,
    employee::{create_employee, delete_employee, list_employees, update_employee},
    health::readyz,
    session::{login, logout, me},
};
use crate::state::AppState;

/// Request body cap. Above the photo limit so oversized photos reach validation.
pub const MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Session
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        // Divisions
        .route("/divisions", get(list_divisions))
        // Employees
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            post(update_employee)
                .put(update_employee)
                .delete(delete_employee),
        );

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api)
        .nest_service("/storage", ServeDir::new(state.images.root()))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(CorsLayer::permissive())
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
