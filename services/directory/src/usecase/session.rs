use chrono::{Duration, Utc};
use tracing::{debug, info};

use staffdesk_auth_types::token::PlainTextToken;
use staffdesk_domain::id::AdminId;

use crate::domain::repository::{AccessTokenRepository, AdminRepository};
use crate::domain::types::{AccessToken, Admin};
use crate::error::{DirectoryError, ValidationErrors};
use crate::usecase::filled;
use crate::usecase::password::{hash_password, verify_password};

/// An authorized request: the operator and the token they presented.
#[derive(Debug, Clone)]
pub struct Session {
    pub admin: Admin,
    pub token: PlainTextToken,
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub admin: Admin,
    pub token: PlainTextToken,
}

pub struct LoginUseCase<A: AdminRepository, T: AccessTokenRepository> {
    pub admins: A,
    pub tokens: T,
    /// `None` issues tokens that never expire.
    pub token_ttl: Option<Duration>,
}

impl<A: AdminRepository, T: AccessTokenRepository> LoginUseCase<A, T> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, DirectoryError> {
        let mut errors = ValidationErrors::default();
        let username = filled(input.username);
        if username.is_none() {
            errors.add("username", "Username is required");
        }
        // Passwords are compared verbatim, never trimmed.
        let password = input.password.filter(|p| !p.is_empty());
        if password.is_none() {
            errors.add("password", "Password is required");
        }
        let (Some(username), Some(password)) = (username, password) else {
            return Err(DirectoryError::Validation(errors));
        };

        let admin = self
            .admins
            .find_by_username(&username)
            .await?
            .ok_or(DirectoryError::InvalidCredentials)?;
        if !verify_password(&password, &admin.password_hash) {
            debug!(admin_id = %admin.id, "password mismatch");
            return Err(DirectoryError::InvalidCredentials);
        }

        let token = PlainTextToken::generate();
        let now = Utc::now();
        self.tokens
            .create(&AccessToken {
                id: token.id,
                admin_id: admin.id,
                token_hash: token.digest(),
                expires_at: self.token_ttl.map(|ttl| now + ttl),
                last_used_at: None,
                created_at: now,
            })
            .await?;
        info!(admin_id = %admin.id, token_id = %token.id, "admin logged in");
        Ok(LoginOutput { admin, token })
    }
}

// ── Authorize ────────────────────────────────────────────────────────────────

pub struct AuthorizeUseCase<A: AdminRepository, T: AccessTokenRepository> {
    pub admins: A,
    pub tokens: T,
}

impl<A: AdminRepository, T: AccessTokenRepository> AuthorizeUseCase<A, T> {
    /// Resolve a raw bearer credential to a session. Every failure is
    /// [`DirectoryError::Unauthenticated`] except backend errors.
    pub async fn execute(&self, raw: &str) -> Result<Session, DirectoryError> {
        let token = PlainTextToken::parse(raw).map_err(|_| DirectoryError::Unauthenticated)?;
        let record = self
            .tokens
            .find_by_id(token.id)
            .await?
            .ok_or(DirectoryError::Unauthenticated)?;
        if !token.matches(&record.token_hash) {
            return Err(DirectoryError::Unauthenticated);
        }
        let now = Utc::now();
        if record.is_expired(now) {
            debug!(token_id = %record.id, "expired token presented");
            self.tokens.delete(record.id).await?;
            return Err(DirectoryError::Unauthenticated);
        }
        let admin = self
            .admins
            .find_by_id(record.admin_id)
            .await?
            .ok_or(DirectoryError::Unauthenticated)?;
        self.tokens.touch(record.id, now).await?;
        Ok(Session { admin, token })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<T: AccessTokenRepository> {
    pub tokens: T,
}

impl<T: AccessTokenRepository> LogoutUseCase<T> {
    /// Revoke `token`. Unknown or already revoked tokens succeed.
    pub async fn execute(&self, token: &PlainTextToken) -> Result<(), DirectoryError> {
        let Some(record) = self.tokens.find_by_id(token.id).await? else {
            return Ok(());
        };
        if !token.matches(&record.token_hash) {
            return Ok(());
        }
        if self.tokens.delete(record.id).await? {
            info!(admin_id = %record.admin_id, token_id = %record.id, "admin logged out");
        }
        Ok(())
    }
}

// ── CreateAdmin ──────────────────────────────────────────────────────────────

pub struct CreateAdminInput {
    pub name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

pub struct CreateAdminUseCase<A: AdminRepository> {
    pub admins: A,
}

impl<A: AdminRepository> CreateAdminUseCase<A> {
    pub async fn execute(&self, input: CreateAdminInput) -> Result<Admin, DirectoryError> {
        let mut errors = ValidationErrors::default();
        let name = filled(Some(input.name));
        let username = filled(Some(input.username));
        let phone = filled(Some(input.phone));
        let email = filled(Some(input.email));
        for (field, value) in [
            ("name", &name),
            ("username", &username),
            ("phone", &phone),
            ("email", &email),
        ] {
            if value.is_none() {
                errors.add(field, format!("The {field} field is required"));
            }
        }
        if input.password.is_empty() {
            errors.add("password", "Password is required");
        }
        let (Some(name), Some(username), Some(phone), Some(email)) = (name, username, phone, email)
        else {
            return Err(DirectoryError::Validation(errors));
        };
        errors.into_result()?;

        if self.admins.find_by_username(&username).await?.is_some() {
            return Err(DirectoryError::AdminAlreadyExists);
        }
        let now = Utc::now();
        let admin = Admin {
            id: AdminId::generate(),
            name,
            username,
            phone,
            email,
            password_hash: hash_password(&input.password)?,
            created_at: now,
            updated_at: now,
        };
        self.admins.create(&admin).await?;
        info!(admin_id = %admin.id, username = %admin.username, "admin created");
        Ok(admin)
    }
}
