//! In-process store for demo mode and tests.
//!
//! One lock guards every table, so each repository call is atomic with respect
//! to the others. Vec order is the natural order.

use std::sync::Arc;

use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use staffdesk_directory_migration::SEED_DIVISIONS;
use staffdesk_domain::id::{AdminId, DivisionId, EmployeeId};
use staffdesk_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{
    AccessTokenRepository, AdminRepository, DivisionRepository, EmployeeRepository,
};
use crate::domain::types::{
    AccessToken, Admin, Division, Employee, EmployeeChanges, NewEmployee,
};
use crate::error::DirectoryError;
use crate::usecase::password::hash_password;

#[derive(Debug, Clone)]
struct EmployeeRow {
    id: EmployeeId,
    image: Option<String>,
    name: String,
    phone: String,
    division_id: DivisionId,
    position: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    admins: Vec<Admin>,
    tokens: Vec<AccessToken>,
    divisions: Vec<Division>,
    employees: Vec<EmployeeRow>,
}

impl Tables {
    fn join(&self, row: &EmployeeRow) -> Option<Employee> {
        let division = self.divisions.iter().find(|d| d.id == row.division_id)?;
        Some(Employee {
            id: row.id,
            image: row.image.clone(),
            name: row.name.clone(),
            phone: row.phone.clone(),
            division: division.clone(),
            position: row.position.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn contains_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

// (id, name, phone, photo, division id, position)
const DEMO_EMPLOYEES: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d", "John Doe", "081234567890", "https://i.pravatar.cc/150?img=1", "550e8400-e29b-41d4-a716-446655440001", "Senior Developer"),
    ("7c9e6679-7425-40de-944b-e07fc1f90ae7", "Jane Smith", "081234567891", "https://i.pravatar.cc/150?img=5", "550e8400-e29b-41d4-a716-446655440002", "Lead Frontend Developer"),
    ("3fa85f64-5717-4562-b3fc-2c963f66afa6", "Michael Johnson", "081234567892", "https://i.pravatar.cc/150?img=12", "550e8400-e29b-41d4-a716-446655440003", "Full Stack Developer"),
    ("6ba7b810-9dad-11d1-80b4-00c04fd430c8", "Sarah Williams", "081234567893", "https://i.pravatar.cc/150?img=20", "550e8400-e29b-41d4-a716-446655440004", "Mobile Developer"),
    ("1b9d6bcd-bbfd-4b2d-9b5d-ab8dfbbd4bed", "David Brown", "081234567894", "https://i.pravatar.cc/150?img=33", "550e8400-e29b-41d4-a716-446655440005", "QA Engineer"),
    ("f47ac10b-58cc-4372-a567-0e02b2c3d479", "Emily Davis", "081234567895", "https://i.pravatar.cc/150?img=45", "550e8400-e29b-41d4-a716-446655440006", "Senior UI/UX Designer"),
    ("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11", "Robert Martinez", "081234567896", "https://i.pravatar.cc/150?img=51", "550e8400-e29b-41d4-a716-446655440001", "Backend Developer"),
    ("c9bf9e57-1685-4c89-bafb-ff5af830be8a", "Lisa Anderson", "081234567897", "https://i.pravatar.cc/150?img=27", "550e8400-e29b-41d4-a716-446655440002", "Frontend Developer"),
    ("6ecd8c99-4036-403d-bf84-cf8400f67836", "James Wilson", "081234567898", "https://i.pravatar.cc/150?img=68", "550e8400-e29b-41d4-a716-446655440003", "Junior Full Stack Developer"),
    ("110ec58a-a0f2-4ac4-8393-c866d813b8d1", "Maria Garcia", "081234567899", "https://i.pravatar.cc/150?img=38", "550e8400-e29b-41d4-a716-446655440004", "iOS Developer"),
    ("3b241101-e2bb-4255-8caf-4136c566a962", "Christopher Lee", "081234567800", "https://i.pravatar.cc/150?img=15", "550e8400-e29b-41d4-a716-446655440005", "Test Automation Engineer"),
    ("87b3a8e2-5e4d-4f9a-b8c3-1d2e3f4a5b6c", "Jessica Taylor", "081234567801", "https://i.pravatar.cc/150?img=26", "550e8400-e29b-41d4-a716-446655440006", "UI Designer"),
];

const DEMO_ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

impl MemoryStore {
    pub fn new(divisions: Vec<Division>, admins: Vec<Admin>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                admins,
                divisions,
                ..Tables::default()
            })),
        }
    }

    /// Seeded store: the fixed divisions, twelve sample employees and an `admin`
    /// account with `admin_password`.
    pub fn demo(admin_password: &str) -> Result<Self, DirectoryError> {
        let now = Utc::now();
        let divisions = SEED_DIVISIONS
            .iter()
            .map(|(id, name)| {
                Ok(Division {
                    id: id.parse().context("seed division id")?,
                    name: (*name).to_owned(),
                })
            })
            .collect::<Result<Vec<_>, anyhow::Error>>()?;
        let employees = DEMO_EMPLOYEES
            .iter()
            .enumerate()
            .map(|(i, (id, name, phone, photo, division_id, position))| {
                let age = (DEMO_EMPLOYEES.len() - i) as i64;
                let created_at = now - Duration::milliseconds(age);
                Ok(EmployeeRow {
                    id: id.parse().context("seed employee id")?,
                    image: Some((*photo).to_owned()),
                    name: (*name).to_owned(),
                    phone: (*phone).to_owned(),
                    division_id: division_id.parse().context("seed employee division")?,
                    position: (*position).to_owned(),
                    created_at,
                    updated_at: created_at,
                })
            })
            .collect::<Result<Vec<_>, anyhow::Error>>()?;
        let admin = Admin {
            id: AdminId(Uuid::parse_str(DEMO_ADMIN_ID).context("seed admin id")?),
            name: "Administrator".to_owned(),
            username: "admin".to_owned(),
            phone: "081234567890".to_owned(),
            email: "admin@example.com".to_owned(),
            password_hash: hash_password(admin_password)?,
            created_at: now,
            updated_at: now,
        };
        Ok(Self {
            tables: Arc::new(RwLock::new(Tables {
                admins: vec![admin],
                tokens: Vec::new(),
                divisions,
                employees,
            })),
        })
    }
}

// ── Admin repository ─────────────────────────────────────────────────────────

impl AdminRepository for MemoryStore {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, DirectoryError> {
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DirectoryError> {
        let tables = self.tables.read().await;
        Ok(tables.admins.iter().find(|a| a.username == username).cloned())
    }

    async fn create(&self, admin: &Admin) -> Result<(), DirectoryError> {
        let mut tables = self.tables.write().await;
        if tables
            .admins
            .iter()
            .any(|a| a.username == admin.username || a.email == admin.email)
        {
            return Err(anyhow!("duplicate admin username or email").into());
        }
        tables.admins.push(admin.clone());
        Ok(())
    }
}

// ── Access token repository ──────────────────────────────────────────────────

impl AccessTokenRepository for MemoryStore {
    async fn create(&self, token: &AccessToken) -> Result<(), DirectoryError> {
        self.tables.write().await.tokens.push(token.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessToken>, DirectoryError> {
        let tables = self.tables.read().await;
        Ok(tables.tokens.iter().find(|t| t.id == id).cloned())
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DirectoryError> {
        let mut tables = self.tables.write().await;
        if let Some(token) = tables.tokens.iter_mut().find(|t| t.id == id) {
            token.last_used_at = Some(at);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DirectoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.tokens.len();
        tables.tokens.retain(|t| t.id != id);
        Ok(tables.tokens.len() != before)
    }
}

// ── Division repository ──────────────────────────────────────────────────────

impl DivisionRepository for MemoryStore {
    async fn list(
        &self,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Division>, DirectoryError> {
        let tables = self.tables.read().await;
        let matched: Vec<Division> = tables
            .divisions
            .iter()
            .filter(|d| name.is_none_or(|n| contains_insensitive(&d.name, n)))
            .cloned()
            .collect();
        Ok(Page::from_slice(&matched, page))
    }

    async fn exists(&self, id: DivisionId) -> Result<bool, DirectoryError> {
        let tables = self.tables.read().await;
        Ok(tables.divisions.iter().any(|d| d.id == id))
    }
}

// ── Employee repository ──────────────────────────────────────────────────────

impl EmployeeRepository for MemoryStore {
    async fn list(
        &self,
        name: Option<&str>,
        division_id: Option<DivisionId>,
        page: PageRequest,
    ) -> Result<Page<Employee>, DirectoryError> {
        let tables = self.tables.read().await;
        let matched: Vec<Employee> = tables
            .employees
            .iter()
            .filter(|e| name.is_none_or(|n| contains_insensitive(&e.name, n)))
            .filter(|e| division_id.is_none_or(|d| e.division_id == d))
            .filter_map(|e| tables.join(e))
            .collect();
        Ok(Page::from_slice(&matched, page))
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| tables.join(e)))
    }

    async fn create(&self, employee: &NewEmployee) -> Result<(), DirectoryError> {
        let mut tables = self.tables.write().await;
        if !tables.divisions.iter().any(|d| d.id == employee.division_id) {
            return Err(anyhow!("division {} does not exist", employee.division_id).into());
        }
        tables.employees.push(EmployeeRow {
            id: employee.id,
            image: employee.image.clone(),
            name: employee.name.clone(),
            phone: employee.phone.clone(),
            division_id: employee.division_id,
            position: employee.position.clone(),
            created_at: employee.created_at,
            updated_at: employee.created_at,
        });
        Ok(())
    }

    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, DirectoryError> {
        let mut tables = self.tables.write().await;
        if let Some(division_id) = changes.division_id {
            if !tables.divisions.iter().any(|d| d.id == division_id) {
                return Err(anyhow!("division {division_id} does not exist").into());
            }
        }
        let Some(row) = tables.employees.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(phone) = &changes.phone {
            row.phone = phone.clone();
        }
        if let Some(division_id) = changes.division_id {
            row.division_id = division_id;
        }
        if let Some(position) = &changes.position {
            row.position = position.clone();
        }
        if let Some(image) = &changes.image {
            row.image = Some(image.clone());
        }
        row.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, DirectoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.employees.len();
        tables.employees.retain(|e| e.id != id);
        Ok(tables.employees.len() != before)
    }
}
