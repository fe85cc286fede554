use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, ModelTrait, QueryOrder,
};

pub struct IngredientRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IngredientRepository<'a> {
    /// Creates a new instance of [`IngredientRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String) -> Result<entity::ingredient::Model, DbErr> {
        let ingredient = entity::ingredient::ActiveModel {
            name: ActiveValue::Set(name),
            ..Default::default()
        };

        ingredient.insert(self.db).await
    }

    pub async fn get(
        &self,
        ingredient_id: i32,
    ) -> Result<Option<entity::ingredient::Model>, DbErr> {
        entity::prelude::Ingredient::find_by_id(ingredient_id)
            .one(self.db)
            .await
    }

    /// All ingredients ordered by primary key, for the dish form's
    /// multi-select.
    pub async fn all(&self) -> Result<Vec<entity::ingredient::Model>, DbErr> {
        entity::prelude::Ingredient::find()
            .order_by_asc(entity::ingredient::Column::Id)
            .all(self.db)
            .await
    }

    /// Rename an ingredient, returning None if it does not exist.
    pub async fn update(
        &self,
        ingredient_id: i32,
        name: String,
    ) -> Result<Option<entity::ingredient::Model>, DbErr> {
        let ingredient = match entity::prelude::Ingredient::find_by_id(ingredient_id)
            .one(self.db)
            .await?
        {
            Some(ingredient) => ingredient,
            None => return Ok(None),
        };

        let mut ingredient_am = ingredient.into_active_model();
        ingredient_am.name = ActiveValue::Set(name);

        let ingredient = ingredient_am.update(self.db).await?;

        Ok(Some(ingredient))
    }

    /// Deletes an ingredient; its dish memberships are removed by the
    /// cascading foreign key, the dishes themselves are untouched.
    pub async fn delete(&self, ingredient_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Ingredient::delete_by_id(ingredient_id)
            .exec(self.db)
            .await
    }

    /// Dishes this ingredient appears in, ordered by primary key.
    pub async fn dishes(
        &self,
        ingredient: &entity::ingredient::Model,
    ) -> Result<Vec<entity::dish::Model>, DbErr> {
        ingredient
            .find_related(entity::prelude::Dish)
            .order_by_asc(entity::dish::Column::Id)
            .all(self.db)
            .await
    }
}
