use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use staffdesk_core::envelope::Status;

/// Field-keyed validation messages. The first message recorded for a field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error.
    pub fn into_result(self) -> Result<(), DirectoryError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DirectoryError::Validation(self))
        }
    }
}

/// Directory service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("The given data was invalid.")]
    Validation(ValidationErrors),
    #[error("Employee not found")]
    EmployeeNotFound,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Unauthenticated.")]
    Unauthenticated,
    #[error("You are already logged in")]
    AlreadyAuthenticated,
    #[error("Admin already exists")]
    AdminAlreadyExists,
    #[error("Malformed request: {0}")]
    BadRequest(String),
    #[error("Failed to process request: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl DirectoryError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::AlreadyAuthenticated => "ALREADY_AUTHENTICATED",
            Self::AdminAlreadyExists => "ADMIN_ALREADY_EXISTS",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::EmployeeNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::AlreadyAuthenticated => StatusCode::FORBIDDEN,
            Self::AdminAlreadyExists => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: Status,
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ValidationErrors>,
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let errors = match &self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        };
        let body = ErrorBody {
            status: Status::Error,
            kind: self.kind(),
            message: self.to_string(),
            errors,
        };
        (status, axum::Json(body)).into_response()
    }
}
