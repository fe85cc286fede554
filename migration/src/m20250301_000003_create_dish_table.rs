use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000002_create_dish_type_table::DishType;

static FK_DISH_DISH_TYPE_ID: &str = "fk_dish_dish_type_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dish::Table)
                    .if_not_exists()
                    .col(pk_auto(Dish::Id))
                    .col(string_uniq(Dish::Name))
                    .col(text(Dish::Description))
                    .col(decimal_len(Dish::Price, 6, 2))
                    .col(integer(Dish::DishTypeId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DISH_DISH_TYPE_ID)
                    .from_tbl(Dish::Table)
                    .from_col(Dish::DishTypeId)
                    .to_tbl(DishType::Table)
                    .to_col(DishType::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DISH_DISH_TYPE_ID)
                    .table(Dish::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Dish::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Dish {
    Table,
    Id,
    Name,
    Description,
    Price,
    DishTypeId,
}
