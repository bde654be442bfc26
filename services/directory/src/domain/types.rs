use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use staffdesk_domain::id::{AdminId, DivisionId, EmployeeId};

/// Storage category for employee photos.
pub const EMPLOYEE_IMAGE_CATEGORY: &str = "employees";

pub const NAME_MAX_CHARS: usize = 255;
pub const PHONE_MAX_CHARS: usize = 20;
pub const POSITION_MAX_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: AdminId,
    pub name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Server-side record of an issued session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub id: Uuid,
    pub admin_id: AdminId,
    /// Hex SHA-256 of the secret half of the token.
    pub token_hash: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub id: DivisionId,
    pub name: String,
}

/// An employee joined with its division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    /// Storage reference of the photo, if any.
    pub image: Option<String>,
    pub name: String,
    pub phone: String,
    pub division: Division,
    pub position: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub id: EmployeeId,
    pub image: Option<String>,
    pub name: String,
    pub phone: String,
    pub division_id: DivisionId,
    pub position: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub division_id: Option<DivisionId>,
    pub position: Option<String>,
    pub image: Option<String>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.division_id.is_none()
            && self.position.is_none()
            && self.image.is_none()
    }
}

/// Uploaded file contents. The format is sniffed from the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Bytes,
}

/// Raw employee form fields. Every field is optional at this stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub division: Option<String>,
    pub position: Option<String>,
    pub image: Option<ImageUpload>,
}
