//! Runtime choice between the PostgreSQL and in-memory stores.
//!
//! Handlers are written against concrete repository types so their futures stay
//! `Send`. Each `*Repo` enum forwards to whichever store is configured.

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use staffdesk_domain::id::{AdminId, DivisionId, EmployeeId};
use staffdesk_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{
    AccessTokenRepository, AdminRepository, DivisionRepository, EmployeeRepository,
};
use crate::domain::types::{
    AccessToken, Admin, Division, Employee, EmployeeChanges, NewEmployee,
};
use crate::error::DirectoryError;
use crate::infra::db::{
    DbAccessTokenRepository, DbAdminRepository, DbDivisionRepository, DbEmployeeRepository,
};
use crate::infra::memory::MemoryStore;

#[derive(Clone)]
pub enum Backend {
    Database(DatabaseConnection),
    Memory(MemoryStore),
}

impl Backend {
    pub fn admin_repo(&self) -> AdminRepo {
        match self {
            Self::Database(db) => AdminRepo::Db(DbAdminRepository { db: db.clone() }),
            Self::Memory(store) => AdminRepo::Memory(store.clone()),
        }
    }

    pub fn token_repo(&self) -> TokenRepo {
        match self {
            Self::Database(db) => TokenRepo::Db(DbAccessTokenRepository { db: db.clone() }),
            Self::Memory(store) => TokenRepo::Memory(store.clone()),
        }
    }

    pub fn division_repo(&self) -> DivisionRepo {
        match self {
            Self::Database(db) => DivisionRepo::Db(DbDivisionRepository { db: db.clone() }),
            Self::Memory(store) => DivisionRepo::Memory(store.clone()),
        }
    }

    pub fn employee_repo(&self) -> EmployeeRepo {
        match self {
            Self::Database(db) => EmployeeRepo::Db(DbEmployeeRepository { db: db.clone() }),
            Self::Memory(store) => EmployeeRepo::Memory(store.clone()),
        }
    }

    /// Readiness probe: round-trip to the database, always ready in memory.
    pub async fn ping(&self) -> Result<(), DirectoryError> {
        match self {
            Self::Database(db) => {
                db.ping().await.context("ping database")?;
                Ok(())
            }
            Self::Memory(_) => Ok(()),
        }
    }
}

pub enum AdminRepo {
    Db(DbAdminRepository),
    Memory(MemoryStore),
}

impl AdminRepository for AdminRepo {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, DirectoryError> {
        match self {
            Self::Db(r) => r.find_by_id(id).await,
            Self::Memory(r) => AdminRepository::find_by_id(r, id).await,
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DirectoryError> {
        match self {
            Self::Db(r) => r.find_by_username(username).await,
            Self::Memory(r) => r.find_by_username(username).await,
        }
    }

    async fn create(&self, admin: &Admin) -> Result<(), DirectoryError> {
        match self {
            Self::Db(r) => r.create(admin).await,
            Self::Memory(r) => AdminRepository::create(r, admin).await,
        }
    }
}

pub enum TokenRepo {
    Db(DbAccessTokenRepository),
    Memory(MemoryStore),
}

impl AccessTokenRepository for TokenRepo {
    async fn create(&self, token: &AccessToken) -> Result<(), DirectoryError> {
        match self {
            Self::Db(r) => r.create(token).await,
            Self::Memory(r) => AccessTokenRepository::create(r, token).await,
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessToken>, DirectoryError> {
        match self {
            Self::Db(r) => r.find_by_id(id).await,
            Self::Memory(r) => AccessTokenRepository::find_by_id(r, id).await,
        }
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DirectoryError> {
        match self {
            Self::Db(r) => r.touch(id, at).await,
            Self::Memory(r) => r.touch(id, at).await,
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DirectoryError> {
        match self {
            Self::Db(r) => r.delete(id).await,
            Self::Memory(r) => AccessTokenRepository::delete(r, id).await,
        }
    }
}

pub enum DivisionRepo {
    Db(DbDivisionRepository),
    Memory(MemoryStore),
}

impl DivisionRepository for DivisionRepo {
    async fn list(
        &self,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Division>, DirectoryError> {
        match self {
            Self::Db(r) => r.list(name, page).await,
            Self::Memory(r) => DivisionRepository::list(r, name, page).await,
        }
    }

    async fn exists(&self, id: DivisionId) -> Result<bool, DirectoryError> {
        match self {
            Self::Db(r) => r.exists(id).await,
            Self::Memory(r) => r.exists(id).await,
        }
    }
}

pub enum EmployeeRepo {
    Db(DbEmployeeRepository),
    Memory(MemoryStore),
}

impl EmployeeRepository for EmployeeRepo {
    async fn list(
        &self,
        name: Option<&str>,
        division_id: Option<DivisionId>,
        page: PageRequest,
    ) -> Result<Page<Employee>, DirectoryError> {
        match self {
            Self::Db(r) => r.list(name, division_id, page).await,
            Self::Memory(r) => EmployeeRepository::list(r, name, division_id, page).await,
        }
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        match self {
            Self::Db(r) => r.find_by_id(id).await,
            Self::Memory(r) => EmployeeRepository::find_by_id(r, id).await,
        }
    }

    async fn create(&self, employee: &NewEmployee) -> Result<(), DirectoryError> {
        match self {
            Self::Db(r) => r.create(employee).await,
            Self::Memory(r) => EmployeeRepository::create(r, employee).await,
        }
    }

    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, DirectoryError> {
        match self {
            Self::Db(r) => r.update(id, changes).await,
            Self::Memory(r) => r.update(id, changes).await,
        }
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, DirectoryError> {
        match self {
            Self::Db(r) => r.delete(id).await,
            Self::Memory(r) => EmployeeRepository::delete(r, id).await,
        }
    }
}
