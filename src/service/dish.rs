use sea_orm::DatabaseConnection;

use crate::{
    data::{
        dish::{DishRepository, NewDish},
        dish_type::DishTypeRepository,
        ingredient::IngredientRepository,
    },
    error::Error,
    model::form::{DishSubmission, FieldErrors, INVALID_CHOICE_MESSAGE},
    service::Submission,
};

pub const DISH_NAME_TAKEN_MESSAGE: &str = "Dish with this Name already exists.";

pub struct DishService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DishService<'a> {
    /// Creates a new instance of [`DishService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists a dish submission. With a `dish_id` this is an update,
    /// otherwise a create. A name already used by a different dish, or a
    /// dish type or ingredient id that no longer resolves (the row may
    /// have been deleted while the form was open), comes back as a field
    /// error; updating a missing dish is NotFound.
    pub async fn save(
        &self,
        dish_id: Option<i32>,
        submission: DishSubmission,
    ) -> Result<Submission<entity::dish::Model>, Error> {
        let dish_repository = DishRepository::new(self.db);

        let mut errors = FieldErrors::default();

        if let Some(existing) = dish_repository.find_by_name(&submission.name).await? {
            if Some(existing.id) != dish_id {
                errors.add("name", DISH_NAME_TAKEN_MESSAGE);
            }
        }

        if DishTypeRepository::new(self.db)
            .get(submission.dish_type_id)
            .await?
            .is_none()
        {
            errors.add("dish_type", INVALID_CHOICE_MESSAGE);
        }

        let ingredient_repository = IngredientRepository::new(self.db);
        for &ingredient_id in &submission.ingredient_ids {
            if ingredient_repository.get(ingredient_id).await?.is_none() {
                errors.add("ingredients", INVALID_CHOICE_MESSAGE);
                break;
            }
        }

        if !errors.is_empty() {
            return Ok(Submission::Invalid(errors));
        }

        let new_dish = NewDish {
            name: submission.name,
            description: submission.description,
            price: submission.price,
            dish_type_id: submission.dish_type_id,
            ingredient_ids: submission.ingredient_ids,
        };

        let dish = match dish_id {
            Some(dish_id) => dish_repository
                .update(dish_id, new_dish)
                .await?
                .ok_or(Error::NotFound("Dish"))?,
            None => dish_repository.create(new_dish).await?,
        };

        Ok(Submission::Saved(dish))
    }

    /// Flips the cook's assignment to the dish, returning the new state.
    pub async fn toggle_assignment(&self, dish_id: i32, cook_id: i32) -> Result<bool, Error> {
        let dish_repository = DishRepository::new(self.db);

        if dish_repository.get(dish_id).await?.is_none() {
            return Err(Error::NotFound("Dish"));
        }

        Ok(dish_repository.toggle_cook(dish_id, cook_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use galley_test_utils::prelude::*;
    use rust_decimal::Decimal;

    use crate::{
        model::form::DishSubmission,
        service::{dish::DishService, dish::DISH_NAME_TAKEN_MESSAGE, Submission},
    };

    fn submission(name: &str, dish_type_id: i32) -> DishSubmission {
        DishSubmission {
            name: name.to_string(),
            description: format!("{name} description"),
            price: Decimal::new(1399, 2),
            dish_type_id,
            ingredient_ids: vec![],
        }
    }

    mod save_tests {
        use super::*;
        use crate::{error::Error, model::form::INVALID_CHOICE_MESSAGE};

        #[tokio::test]
        /// Expect a second dish with the name of an existing one to be
        /// rejected with a field error
        async fn test_create_duplicate_name_field_error() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let dish_service = DishService::new(&test.db);

            let dish_type = factory::create_dish_type(&test.db, "Soup").await?;

            dish_service
                .save(None, submission("Green Soup", dish_type.id))
                .await
                .unwrap();

            let Submission::Invalid(errors) = dish_service
                .save(None, submission("Green Soup", dish_type.id))
                .await
                .unwrap()
            else {
                panic!("expected the duplicate dish to be rejected");
            };

            assert_eq!(errors.messages("name"), [DISH_NAME_TAKEN_MESSAGE]);

            Ok(())
        }

        #[tokio::test]
        /// Expect an update keeping the dish's own name to pass the
        /// uniqueness check
        async fn test_update_keeping_own_name() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let dish_service = DishService::new(&test.db);

            let dish_type = factory::create_dish_type(&test.db, "Soup").await?;

            let Submission::Saved(dish) = dish_service
                .save(None, submission("Borsch", dish_type.id))
                .await
                .unwrap()
            else {
                panic!("expected the dish to be saved");
            };

            let mut update = submission("Borsch", dish_type.id);
            update.price = Decimal::new(950, 2);

            let Submission::Saved(updated) =
                dish_service.save(Some(dish.id), update).await.unwrap()
            else {
                panic!("expected the update to be saved");
            };

            assert_eq!(updated.price, Decimal::new(950, 2));

            Ok(())
        }

        #[tokio::test]
        /// Expect renaming a dish onto another dish's name to be rejected
        async fn test_update_onto_taken_name() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let dish_service = DishService::new(&test.db);

            let dish_type = factory::create_dish_type(&test.db, "Soup").await?;

            dish_service
                .save(None, submission("Green Soup", dish_type.id))
                .await
                .unwrap();
            let Submission::Saved(borsch) = dish_service
                .save(None, submission("Borsch", dish_type.id))
                .await
                .unwrap()
            else {
                panic!("expected the dish to be saved");
            };

            let result = dish_service
                .save(Some(borsch.id), submission("Green Soup", dish_type.id))
                .await
                .unwrap();

            assert!(matches!(result, Submission::Invalid(_)));

            Ok(())
        }

        #[tokio::test]
        /// Expect NotFound when updating a dish that does not exist
        async fn test_update_missing_dish() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let dish_service = DishService::new(&test.db);

            let dish_type = factory::create_dish_type(&test.db, "Soup").await?;

            let result = dish_service
                .save(Some(42), submission("Borsch", dish_type.id))
                .await;

            assert!(matches!(result, Err(Error::NotFound("Dish"))));

            Ok(())
        }

        #[tokio::test]
        /// Expect a dish type id that no longer resolves to be rejected
        /// as a field error, not a constraint violation
        async fn test_stale_dish_type_field_error() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let dish_service = DishService::new(&test.db);

            let Submission::Invalid(errors) = dish_service
                .save(None, submission("Borsch", 42))
                .await
                .unwrap()
            else {
                panic!("expected the stale dish type to be rejected");
            };

            assert_eq!(errors.messages("dish_type"), [INVALID_CHOICE_MESSAGE]);

            Ok(())
        }

        #[tokio::test]
        /// Expect an ingredient id that no longer resolves to be rejected
        /// as a field error, not a constraint violation
        async fn test_stale_ingredient_field_error() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let dish_service = DishService::new(&test.db);

            let dish_type = factory::create_dish_type(&test.db, "Soup").await?;
            let tomato = factory::create_ingredient(&test.db, "Tomato").await?;

            let mut stale = submission("Borsch", dish_type.id);
            stale.ingredient_ids = vec![tomato.id, 42];

            let Submission::Invalid(errors) = dish_service.save(None, stale).await.unwrap()
            else {
                panic!("expected the stale ingredient to be rejected");
            };

            assert_eq!(errors.messages("ingredients"), [INVALID_CHOICE_MESSAGE]);

            Ok(())
        }
    }

    mod toggle_assignment_tests {
        use super::*;
        use crate::error::Error;

        #[tokio::test]
        /// Expect the assignment to flip on and back off
        async fn test_toggle_round_trip() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let dish_service = DishService::new(&test.db);

            let dish_type = factory::create_dish_type(&test.db, "Soup").await?;
            let dish = factory::create_dish(&test.db, "Borsch", "8.50", dish_type.id).await?;
            let cook = factory::create_cook(&test.db, "amir").await?;

            assert!(dish_service
                .toggle_assignment(dish.id, cook.id)
                .await
                .unwrap());
            assert!(!dish_service
                .toggle_assignment(dish.id, cook.id)
                .await
                .unwrap());

            Ok(())
        }

        #[tokio::test]
        /// Expect NotFound when toggling on a missing dish
        async fn test_toggle_missing_dish() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let dish_service = DishService::new(&test.db);

            let cook = factory::create_cook(&test.db, "amir").await?;

            let result = dish_service.toggle_assignment(42, cook.id).await;

            assert!(matches!(result, Err(Error::NotFound("Dish"))));

            Ok(())
        }
    }
}
