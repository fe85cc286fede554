use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A staff account. `years_of_experience` is nullable at the storage level;
/// the form layer constrains it to [1, 45].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "cook")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub years_of_experience: Option<i32>,
    pub is_staff: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::dish::Entity> for Entity {
    fn to() -> RelationDef {
        super::dish_cook::Relation::Dish.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::dish_cook::Relation::Cook.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
