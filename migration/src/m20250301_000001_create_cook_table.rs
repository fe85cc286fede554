use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cook::Table)
                    .if_not_exists()
                    .col(pk_auto(Cook::Id))
                    .col(string_uniq(Cook::Username))
                    .col(string(Cook::PasswordHash))
                    .col(string(Cook::FirstName))
                    .col(string(Cook::LastName))
                    .col(integer_null(Cook::YearsOfExperience))
                    .col(boolean(Cook::IsStaff).default(false))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cook::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Cook {
    Table,
    Id,
    Username,
    PasswordHash,
    FirstName,
    LastName,
    YearsOfExperience,
    IsStaff,
}
