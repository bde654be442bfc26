use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use staffdesk_core::sea_ext::contains_insensitive;
use staffdesk_directory_schema::{access_tokens, admins, divisions, employees};
use staffdesk_domain::id::{AdminId, DivisionId, EmployeeId};
use staffdesk_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{
    AccessTokenRepository, AdminRepository, DivisionRepository, EmployeeRepository,
};
use crate::domain::types::{
    AccessToken, Admin, Division, Employee, EmployeeChanges, NewEmployee,
};
use crate::error::DirectoryError;

// ── Admin repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdminRepository {
    pub db: DatabaseConnection,
}

impl AdminRepository for DbAdminRepository {
    async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>, DirectoryError> {
        let model = admins::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find admin by id")?;
        Ok(model.map(admin_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DirectoryError> {
        let model = admins::Entity::find()
            .filter(admins::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find admin by username")?;
        Ok(model.map(admin_from_model))
    }

    async fn create(&self, admin: &Admin) -> Result<(), DirectoryError> {
        admins::ActiveModel {
            id: Set(admin.id.0),
            name: Set(admin.name.clone()),
            username: Set(admin.username.clone()),
            phone: Set(admin.phone.clone()),
            email: Set(admin.email.clone()),
            password: Set(admin.password_hash.clone()),
            created_at: Set(admin.created_at),
            updated_at: Set(admin.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create admin")?;
        Ok(())
    }
}

fn admin_from_model(m: admins::Model) -> Admin {
    Admin {
        id: AdminId(m.id),
        name: m.name,
        username: m.username,
        phone: m.phone,
        email: m.email,
        password_hash: m.password,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Access token repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccessTokenRepository {
    pub db: DatabaseConnection,
}

impl AccessTokenRepository for DbAccessTokenRepository {
    async fn create(&self, token: &AccessToken) -> Result<(), DirectoryError> {
        access_tokens::ActiveModel {
            id: Set(token.id),
            admin_id: Set(token.admin_id.0),
            token_hash: Set(token.token_hash.clone()),
            expires_at: Set(token.expires_at),
            last_used_at: Set(token.last_used_at),
            created_at: Set(token.created_at),
        }
        .insert(&self.db)
        .await
        .context("create access token")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccessToken>, DirectoryError> {
        let model = access_tokens::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find access token")?;
        Ok(model.map(|m| AccessToken {
            id: m.id,
            admin_id: AdminId(m.admin_id),
            token_hash: m.token_hash,
            expires_at: m.expires_at,
            last_used_at: m.last_used_at,
            created_at: m.created_at,
        }))
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DirectoryError> {
        access_tokens::Entity::update_many()
            .col_expr(access_tokens::Column::LastUsedAt, Expr::value(at))
            .filter(access_tokens::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("touch access token")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DirectoryError> {
        let result = access_tokens::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete access token")?;
        Ok(result.rows_affected > 0)
    }
}

// ── Division repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDivisionRepository {
    pub db: DatabaseConnection,
}

impl DivisionRepository for DbDivisionRepository {
    async fn list(
        &self,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Division>, DirectoryError> {
        let page = page.clamped();
        let mut query = divisions::Entity::find();
        if let Some(term) = name {
            query = query.filter(contains_insensitive(
                (divisions::Entity, divisions::Column::Name),
                term,
            ));
        }
        let query = query
            .order_by_asc(divisions::Column::CreatedAt)
            .order_by_asc(divisions::Column::Id);

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count divisions")?;
        if page.offset() >= total {
            return Ok(Page::new(Vec::new(), page, total));
        }
        let models = query
            .offset(page.offset())
            .limit(page.per_page)
            .all(&self.db)
            .await
            .context("list divisions")?;
        let items = models.into_iter().map(division_from_model).collect();
        Ok(Page::new(items, page, total))
    }

    async fn exists(&self, id: DivisionId) -> Result<bool, DirectoryError> {
        let count = divisions::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check division exists")?;
        Ok(count > 0)
    }
}

fn division_from_model(m: divisions::Model) -> Division {
    Division {
        id: DivisionId(m.id),
        name: m.name,
    }
}

// ── Employee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn list(
        &self,
        name: Option<&str>,
        division_id: Option<DivisionId>,
        page: PageRequest,
    ) -> Result<Page<Employee>, DirectoryError> {
        let page = page.clamped();
        let mut query = employees::Entity::find().find_also_related(divisions::Entity);
        if let Some(term) = name {
            query = query.filter(contains_insensitive(
                (employees::Entity, employees::Column::Name),
                term,
            ));
        }
        if let Some(division_id) = division_id {
            query = query.filter(employees::Column::DivisionId.eq(division_id.0));
        }
        let query = query
            .order_by_asc(employees::Column::CreatedAt)
            .order_by_asc(employees::Column::Id);

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count employees")?;
        if page.offset() >= total {
            return Ok(Page::new(Vec::new(), page, total));
        }
        let rows = query
            .offset(page.offset())
            .limit(page.per_page)
            .all(&self.db)
            .await
            .context("list employees")?;
        let items = rows
            .into_iter()
            .map(|(employee, division)| employee_from_models(employee, division))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, total))
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, DirectoryError> {
        let row = employees::Entity::find_by_id(id.0)
            .find_also_related(divisions::Entity)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        row.map(|(employee, division)| employee_from_models(employee, division))
            .transpose()
    }

    async fn create(&self, employee: &NewEmployee) -> Result<(), DirectoryError> {
        employees::ActiveModel {
            id: Set(employee.id.0),
            image: Set(employee.image.clone()),
            name: Set(employee.name.clone()),
            phone: Set(employee.phone.clone()),
            division_id: Set(employee.division_id.0),
            position: Set(employee.position.clone()),
            created_at: Set(employee.created_at),
            updated_at: Set(employee.created_at),
        }
        .insert(&self.db)
        .await
        .context("create employee")?;
        Ok(())
    }

    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, DirectoryError> {
        let mut am = employees::ActiveModel {
            id: Set(id.0),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = &changes.name {
            am.name = Set(name.clone());
        }
        if let Some(phone) = &changes.phone {
            am.phone = Set(phone.clone());
        }
        if let Some(division_id) = changes.division_id {
            am.division_id = Set(division_id.0);
        }
        if let Some(position) = &changes.position {
            am.position = Set(position.clone());
        }
        if let Some(image) = &changes.image {
            am.image = Set(Some(image.clone()));
        }
        match am.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e).context("update employee").into()),
        }
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, DirectoryError> {
        let result = employees::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete employee")?;
        Ok(result.rows_affected > 0)
    }
}

fn employee_from_models(
    m: employees::Model,
    division: Option<divisions::Model>,
) -> Result<Employee, DirectoryError> {
    let division = division
        .map(division_from_model)
        .ok_or_else(|| anyhow!("employee {} references a missing division", m.id))?;
    Ok(Employee {
        id: EmployeeId(m.id),
        image: m.image,
        name: m.name,
        phone: m.phone,
        division,
        position: m.position,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}
