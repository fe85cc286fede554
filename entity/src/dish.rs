use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A menu item. `name` is unique across all dishes; `price` is a
/// decimal with 2 fractional digits and up to 6 significant digits.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "dish")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub price: Decimal,
    pub dish_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dish_type::Entity",
        from = "Column::DishTypeId",
        to = "super::dish_type::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DishType,
}

impl Related<super::dish_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DishType.def()
    }
}

impl Related<super::cook::Entity> for Entity {
    fn to() -> RelationDef {
        super::dish_cook::Relation::Cook.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::dish_cook::Relation::Dish.def().rev())
    }
}

impl Related<super::ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        super::dish_ingredient::Relation::Ingredient.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::dish_ingredient::Relation::Dish.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
