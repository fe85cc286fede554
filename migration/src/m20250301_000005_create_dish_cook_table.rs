use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250301_000001_create_cook_table::Cook, m20250301_000003_create_dish_table::Dish,
};

static FK_DISH_COOK_DISH_ID: &str = "fk_dish_cook_dish_id";
static FK_DISH_COOK_COOK_ID: &str = "fk_dish_cook_cook_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DishCook::Table)
                    .if_not_exists()
                    .col(integer(DishCook::DishId))
                    .col(integer(DishCook::CookId))
                    .primary_key(
                        Index::create()
                            .col(DishCook::DishId)
                            .col(DishCook::CookId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DISH_COOK_DISH_ID)
                    .from_tbl(DishCook::Table)
                    .from_col(DishCook::DishId)
                    .to_tbl(Dish::Table)
                    .to_col(Dish::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DISH_COOK_COOK_ID)
                    .from_tbl(DishCook::Table)
                    .from_col(DishCook::CookId)
                    .to_tbl(Cook::Table)
                    .to_col(Cook::Id)
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
                    .name(FK_DISH_COOK_DISH_ID)
                    .table(DishCook::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DISH_COOK_COOK_ID)
                    .table(DishCook::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DishCook::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DishCook {
    Table,
    DishId,
    CookId,
}
