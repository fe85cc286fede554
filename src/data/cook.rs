use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder,
};

/// Fields of a cook row to be created. The password arrives already
/// hashed; hashing lives in the cook service.
pub struct NewCook {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub years_of_experience: Option<i32>,
    pub is_staff: bool,
}

pub struct CookRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CookRepository<'a> {
    /// Creates a new instance of [`CookRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new cook
    pub async fn create(&self, new_cook: NewCook) -> Result<entity::cook::Model, DbErr> {
        let cook = entity::cook::ActiveModel {
            username: ActiveValue::Set(new_cook.username),
            password_hash: ActiveValue::Set(new_cook.password_hash),
            first_name: ActiveValue::Set(new_cook.first_name),
            last_name: ActiveValue::Set(new_cook.last_name),
            years_of_experience: ActiveValue::Set(new_cook.years_of_experience),
            is_staff: ActiveValue::Set(new_cook.is_staff),
            ..Default::default()
        };

        cook.insert(self.db).await
    }

    /// Get a cook by primary key
    pub async fn get(&self, cook_id: i32) -> Result<Option<entity::cook::Model>, DbErr> {
        entity::prelude::Cook::find_by_id(cook_id).one(self.db).await
    }

    /// Get a cook by their unique username
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::cook::Model>, DbErr> {
        entity::prelude::Cook::find()
            .filter(entity::cook::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    /// Update a cook's years of experience
    ///
    /// Returns None if the cook does not exist.
    pub async fn update_experience(
        &self,
        cook_id: i32,
        years_of_experience: i32,
    ) -> Result<Option<entity::cook::Model>, DbErr> {
        let cook = match entity::prelude::Cook::find_by_id(cook_id).one(self.db).await? {
            Some(cook) => cook,
            None => return Ok(None),
        };

        let mut cook_am = cook.into_active_model();
        cook_am.years_of_experience = ActiveValue::Set(Some(years_of_experience));

        let cook = cook_am.update(self.db).await?;

        Ok(Some(cook))
    }

    /// Deletes a cook, clearing their dish assignments
    ///
    /// Returns OK regardless of the cook existing; check the
    /// [`DeleteResult::rows_affected`] field for the deletion result.
    pub async fn delete(&self, cook_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Cook::delete_by_id(cook_id)
            .exec(self.db)
            .await
    }

    /// Dishes the cook is assigned to, each with its dish type, ordered by
    /// dish primary key.
    pub async fn dishes_with_types(
        &self,
        cook: &entity::cook::Model,
    ) -> Result<Vec<(entity::dish::Model, Option<entity::dish_type::Model>)>, DbErr> {
        cook.find_related(entity::prelude::Dish)
            .find_also_related(entity::prelude::DishType)
            .order_by_asc(entity::dish::Column::Id)
            .all(self.db)
            .await
    }
}
