use sea_orm_migration::prelude::*;

mod m20251001_000001_create_admins;
mod m20251001_000002_create_divisions;
mod m20251001_000003_create_employees;
mod m20251001_000004_create_access_tokens;
mod m20251001_000005_seed_divisions;

pub use m20251001_000005_seed_divisions::SEED_DIVISIONS;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_admins::Migration),
            Box::new(m20251001_000002_create_divisions::Migration),
            Box::new(m20251001_000003_create_employees::Migration),
            Box::new(m20251001_000004_create_access_tokens::Migration),
            Box::new(m20251001_000005_seed_divisions::Migration),
        ]
    }
}
