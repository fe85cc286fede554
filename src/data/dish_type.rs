use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, ModelTrait, QueryOrder,
};

pub struct DishTypeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DishTypeRepository<'a> {
    /// Creates a new instance of [`DishTypeRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String) -> Result<entity::dish_type::Model, DbErr> {
        let dish_type = entity::dish_type::ActiveModel {
            name: ActiveValue::Set(name),
            ..Default::default()
        };

        dish_type.insert(self.db).await
    }

    pub async fn get(
        &self,
        dish_type_id: i32,
    ) -> Result<Option<entity::dish_type::Model>, DbErr> {
        entity::prelude::DishType::find_by_id(dish_type_id)
            .one(self.db)
            .await
    }

    /// All dish types ordered by primary key, for the dish form's select.
    pub async fn all(&self) -> Result<Vec<entity::dish_type::Model>, DbErr> {
        entity::prelude::DishType::find()
            .order_by_asc(entity::dish_type::Column::Id)
            .all(self.db)
            .await
    }

    /// Rename a dish type, returning None if it does not exist.
    pub async fn update(
        &self,
        dish_type_id: i32,
        name: String,
    ) -> Result<Option<entity::dish_type::Model>, DbErr> {
        let dish_type = match entity::prelude::DishType::find_by_id(dish_type_id)
            .one(self.db)
            .await?
        {
            Some(dish_type) => dish_type,
            None => return Ok(None),
        };

        let mut dish_type_am = dish_type.into_active_model();
        dish_type_am.name = ActiveValue::Set(name);

        let dish_type = dish_type_am.update(self.db).await?;

        Ok(Some(dish_type))
    }

    /// Deletes a dish type; its dishes are removed by the cascading
    /// foreign key.
    pub async fn delete(&self, dish_type_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::DishType::delete_by_id(dish_type_id)
            .exec(self.db)
            .await
    }

    /// Dishes belonging to this dish type, ordered by primary key.
    pub async fn dishes(
        &self,
        dish_type: &entity::dish_type::Model,
    ) -> Result<Vec<entity::dish::Model>, DbErr> {
        dish_type
            .find_related(entity::prelude::Dish)
            .order_by_asc(entity::dish::Column::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use galley_test_utils::prelude::*;
    use sea_orm::EntityTrait;

    use crate::data::dish_type::DishTypeRepository;

    mod crud_tests {
        use super::*;

        #[tokio::test]
        /// Expect create, rename and fetch to round-trip
        async fn test_create_update_get() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let repository = DishTypeRepository::new(&test.db);

            let created = repository.create("Soup".to_string()).await?;

            let renamed = repository
                .update(created.id, "Stew".to_string())
                .await?
                .unwrap();
            assert_eq!(renamed.name, "Stew");

            let fetched = repository.get(created.id).await?.unwrap();
            assert_eq!(fetched.name, "Stew");

            Ok(())
        }

        #[tokio::test]
        /// Expect None when renaming a missing dish type
        async fn test_update_missing_none() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let repository = DishTypeRepository::new(&test.db);

            let result = repository.update(42, "Stew".to_string()).await?;

            assert!(result.is_none());

            Ok(())
        }
    }

    mod delete_tests {
        use super::*;

        #[tokio::test]
        /// Expect deleting a dish type to cascade to its dishes
        async fn test_delete_cascades_to_dishes() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let repository = DishTypeRepository::new(&test.db);

            let dish_type = repository.create("Soup".to_string()).await?;
            factory::create_dish(&test.db, "Borsch", "8.50", dish_type.id).await?;
            factory::create_dish(&test.db, "Green Soup", "13.99", dish_type.id).await?;

            let result = repository.delete(dish_type.id).await?;
            assert_eq!(result.rows_affected, 1);

            let dishes = entity::prelude::Dish::find().all(&test.db).await?;
            assert!(dishes.is_empty());

            Ok(())
        }
    }
}
