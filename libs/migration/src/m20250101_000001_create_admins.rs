use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const UQ_ADMINS_EMAIL: &str = "uq_admins_email";
const UQ_ADMINS_NAME: &str = "uq_admins_name";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(pk_auto(Admins::Id))
                    .col(string_len(Admins::Email, 64))
                    .col(string_len(Admins::Name, 20))
                    .col(text(Admins::PasswordHash))
                    .to_owned(),
            )
            .await?;

        // Named so a violation can be traced back to the offending column
        for (name, column) in [
            (UQ_ADMINS_EMAIL, Admins::Email),
            (UQ_ADMINS_NAME, Admins::Name),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Admins::Table)
                        .col(column)
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
    Email,
    Name,
    PasswordHash,
}
