use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEED_USER_EMAILS: [&str; 2] = ["lyle@notreal.com", "michael@notreal.com"];

fn quoted_emails() -> String {
    SEED_USER_EMAILS
        .iter()
        .map(|email| format!("'{email}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let rows = SEED_USER_EMAILS
            .iter()
            .map(|email| format!("('{email}', true)"))
            .collect::<Vec<_>>()
            .join(", ");

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "INSERT INTO users (email, active) VALUES {rows} ON CONFLICT (email) DO NOTHING"
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "DELETE FROM users WHERE email IN ({})",
                quoted_emails()
            ))
            .await?;

        Ok(())
    }
}
