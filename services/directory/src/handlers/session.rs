use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use staffdesk_core::envelope::Envelope;
use staffdesk_domain::id::AdminId;

use crate::domain::types::Admin;
use crate::error::DirectoryError;
use crate::identity::{Authenticated, Guest};
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase, LogoutUseCase};

#[derive(Serialize)]
pub struct AdminResponse {
    pub id: AdminId,
    pub name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            username: admin.username,
            phone: admin.phone,
            email: admin.email,
        }
    }
}

// ── POST /api/login ──────────────────────────────────────────────────────────

#[derive(Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginData {
    pub token: String,
    pub admin: AdminResponse,
}

pub async fn login(
    _guest: Guest,
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Envelope<LoginData>, DirectoryError> {
    // No JSON body at all reads as missing credentials.
    let body = match body {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => LoginRequest::default(),
        Err(e) => return Err(DirectoryError::BadRequest(e.body_text())),
    };
    let usecase = LoginUseCase {
        admins: state.admin_repo(),
        tokens: state.token_repo(),
        token_ttl: state.token_ttl,
    };
    let out = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Envelope::with_data(
        "Login successful",
        LoginData {
            token: out.token.to_string(),
            admin: out.admin.into(),
        },
    ))
}

// ── POST /api/logout ─────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    Authenticated(session): Authenticated,
) -> Result<Envelope, DirectoryError> {
    let usecase = LogoutUseCase {
        tokens: state.token_repo(),
    };
    usecase.execute(&session.token).await?;
    Ok(Envelope::ok("Logout successful"))
}

// ── GET /api/me ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeData {
    pub admin: AdminResponse,
}

pub async fn me(Authenticated(session): Authenticated) -> Envelope<MeData> {
    Envelope::with_data(
        "Profile retrieved successfully",
        MeData {
            admin: session.admin.into(),
        },
    )
}
