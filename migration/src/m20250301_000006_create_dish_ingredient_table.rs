use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250301_000003_create_dish_table::Dish,
    m20250301_000004_create_ingredient_table::Ingredient,
};

static FK_DISH_INGREDIENT_DISH_ID: &str = "fk_dish_ingredient_dish_id";
static FK_DISH_INGREDIENT_INGREDIENT_ID: &str = "fk_dish_ingredient_ingredient_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DishIngredient::Table)
                    .if_not_exists()
                    .col(integer(DishIngredient::DishId))
                    .col(integer(DishIngredient::IngredientId))
                    .primary_key(
                        Index::create()
                            .col(DishIngredient::DishId)
                            .col(DishIngredient::IngredientId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DISH_INGREDIENT_DISH_ID)
                    .from_tbl(DishIngredient::Table)
                    .from_col(DishIngredient::DishId)
                    .to_tbl(Dish::Table)
                    .to_col(Dish::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DISH_INGREDIENT_INGREDIENT_ID)
                    .from_tbl(DishIngredient::Table)
                    .from_col(DishIngredient::IngredientId)
                    .to_tbl(Ingredient::Table)
                    .to_col(Ingredient::Id)
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
                    .name(FK_DISH_INGREDIENT_DISH_ID)
                    .table(DishIngredient::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DISH_INGREDIENT_INGREDIENT_ID)
                    .table(DishIngredient::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DishIngredient::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DishIngredient {
    Table,
    DishId,
    IngredientId,
}
