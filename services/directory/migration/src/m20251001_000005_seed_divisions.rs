use sea_orm_migration::prelude::*;

/// Fixed division set, in natural (insertion) order.
pub const SEED_DIVISIONS: &[(&str, &str)] = &[
    ("550e8400-e29b-41d4-a716-446655440004", "Mobile Apps"),
    ("550e8400-e29b-41d4-a716-446655440005", "QA"),
    ("550e8400-e29b-41d4-a716-446655440003", "Full Stack"),
    ("550e8400-e29b-41d4-a716-446655440001", "Backend"),
    ("550e8400-e29b-41d4-a716-446655440002", "Frontend"),
    ("550e8400-e29b-41d4-a716-446655440006", "UI/UX Designer"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        // Offset created_at per row so ORDER BY created_at keeps the seed order.
        for (offset, (id, name)) in SEED_DIVISIONS.iter().enumerate() {
            let sql = format!(
                "INSERT INTO divisions (id, name, created_at, updated_at) \
                 VALUES ('{id}', '{name}', NOW() + INTERVAL '{offset} milliseconds', NOW()) \
                 ON CONFLICT (id) DO NOTHING",
                name = name.replace('\'', "''"),
            );
            db.execute_unprepared(&sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids = SEED_DIVISIONS
            .iter()
            .map(|(id, _)| format!("'{id}'"))
            .collect::<Vec<_>>()
            .join(", ");
        manager
            .get_connection()
            .execute_unprepared(&format!("DELETE FROM divisions WHERE id IN ({ids})"))
            .await?;
        Ok(())
    }
}
