#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use staffdesk_domain::id::{AdminId, DivisionId, EmployeeId};
use staffdesk_domain::pagination::{Page, PageRequest};

use crate::domain::image::ImageFormat;
use crate::domain::types::{AccessToken, Admin, Division, Employee, EmployeeChanges, NewEmployee};
use crate::error::DirectoryError;

/// Repository for operator accounts.
pub trait AdminRepository: Send + Sync {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, DirectoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DirectoryError>;
    async fn create(&self, admin: &Admin) -> Result<(), DirectoryError>;
}

/// Repository for issued session tokens.
pub trait AccessTokenRepository: Send + Sync {
    async fn create(&self, token: &AccessToken) -> Result<(), DirectoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessToken>, DirectoryError>;
    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DirectoryError>;
    /// Delete a token. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, DirectoryError>;
}

/// Repository for divisions.
pub trait DivisionRepository: Send + Sync {
    /// Divisions in natural order, filtered by case-insensitive name substring
    /// when `name` is `Some` (an empty string matches every row).
    async fn list(
        &self,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Division>, DirectoryError>;

    async fn exists(&self, id: DivisionId) -> Result<bool, DirectoryError>;
}

/// Repository for employees, always read joined with their division.
pub trait EmployeeRepository: Send + Sync {
    /// Employees in natural order. Each `Some` filter adds an AND clause.
    async fn list(
        &self,
        name: Option<&str>,
        division_id: Option<DivisionId>,
        page: PageRequest,
    ) -> Result<Page<Employee>, DirectoryError>;

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, DirectoryError>;
    async fn create(&self, employee: &NewEmployee) -> Result<(), DirectoryError>;

    /// Apply `changes`. Returns `false` if the row no longer exists.
    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, DirectoryError>;

    /// Delete an employee. Returns `true` if a row was deleted.
    async fn delete(&self, id: EmployeeId) -> Result<bool, DirectoryError>;
}

/// Blob storage for uploaded photos.
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under `category` and return the new reference.
    async fn store(
        &self,
        bytes: &[u8],
        format: ImageFormat,
        category: &str,
    ) -> Result<String, DirectoryError>;

    /// Remove a stored image. Removing a missing file succeeds.
    async fn delete(&self, reference: &str) -> Result<(), DirectoryError>;

    /// Public URL for a reference. Blank references resolve to `None`.
    fn resolve_url(&self, reference: Option<&str>) -> Option<String>;
}
