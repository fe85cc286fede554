use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Serialize;

/// Fields of a dish to be written. The dish row and its ingredient
/// association rows are persisted in one transaction.
#[derive(Debug, Clone)]
pub struct NewDish {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub dish_type_id: i32,
    pub ingredient_ids: Vec<i32>,
}

/// A dish as shown in the listing: with its type and assigned cooks.
#[derive(Debug, Serialize)]
pub struct DishListing {
    pub dish: entity::dish::Model,
    pub dish_type: Option<entity::dish_type::Model>,
    pub cooks: Vec<entity::cook::Model>,
}

/// A dish as shown on the detail page.
#[derive(Debug, Serialize)]
pub struct DishDetail {
    pub dish: entity::dish::Model,
    pub dish_type: Option<entity::dish_type::Model>,
    pub cooks: Vec<entity::cook::Model>,
    pub ingredients: Vec<entity::ingredient::Model>,
}

pub struct DishRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DishRepository<'a> {
    /// Creates a new instance of [`DishRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, dish_id: i32) -> Result<Option<entity::dish::Model>, DbErr> {
        entity::prelude::Dish::find_by_id(dish_id).one(self.db).await
    }

    /// Exact-name lookup backing the uniqueness check.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::dish::Model>, DbErr> {
        entity::prelude::Dish::find()
            .filter(entity::dish::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Creates a dish and its ingredient memberships atomically.
    pub async fn create(&self, new_dish: NewDish) -> Result<entity::dish::Model, DbErr> {
        let txn = self.db.begin().await?;

        let dish = entity::dish::ActiveModel {
            name: ActiveValue::Set(new_dish.name),
            description: ActiveValue::Set(new_dish.description),
            price: ActiveValue::Set(new_dish.price),
            dish_type_id: ActiveValue::Set(new_dish.dish_type_id),
            ..Default::default()
        };

        let dish = dish.insert(&txn).await?;

        let memberships = new_dish
            .ingredient_ids
            .into_iter()
            .map(|ingredient_id| entity::dish_ingredient::ActiveModel {
                dish_id: ActiveValue::Set(dish.id),
                ingredient_id: ActiveValue::Set(ingredient_id),
            });

        entity::prelude::DishIngredient::insert_many(memberships)
            .on_empty_do_nothing()
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(dish)
    }

    /// Updates a dish and replaces its ingredient set atomically.
    ///
    /// Returns None if the dish does not exist.
    pub async fn update(
        &self,
        dish_id: i32,
        new_dish: NewDish,
    ) -> Result<Option<entity::dish::Model>, DbErr> {
        let txn = self.db.begin().await?;

        let dish = match entity::prelude::Dish::find_by_id(dish_id).one(&txn).await? {
            Some(dish) => dish,
            None => return Ok(None),
        };

        let mut dish_am = dish.into_active_model();
        dish_am.name = ActiveValue::Set(new_dish.name);
        dish_am.description = ActiveValue::Set(new_dish.description);
        dish_am.price = ActiveValue::Set(new_dish.price);
        dish_am.dish_type_id = ActiveValue::Set(new_dish.dish_type_id);

        let dish = dish_am.update(&txn).await?;

        entity::prelude::DishIngredient::delete_many()
            .filter(entity::dish_ingredient::Column::DishId.eq(dish.id))
            .exec(&txn)
            .await?;

        let memberships = new_dish
            .ingredient_ids
            .into_iter()
            .map(|ingredient_id| entity::dish_ingredient::ActiveModel {
                dish_id: ActiveValue::Set(dish.id),
                ingredient_id: ActiveValue::Set(ingredient_id),
            });

        entity::prelude::DishIngredient::insert_many(memberships)
            .on_empty_do_nothing()
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(Some(dish))
    }

    /// Deletes a dish; its cook and ingredient memberships go with it via
    /// the cascading foreign keys, the cooks and ingredients stay.
    pub async fn delete(&self, dish_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Dish::delete_by_id(dish_id)
            .exec(self.db)
            .await
    }

    /// Loads the dish type and assigned cooks for one page of dishes.
    pub async fn listing(
        &self,
        dishes: Vec<entity::dish::Model>,
    ) -> Result<Vec<DishListing>, DbErr> {
        let mut listings = Vec::with_capacity(dishes.len());

        for dish in dishes {
            let dish_type = dish
                .find_related(entity::prelude::DishType)
                .one(self.db)
                .await?;
            let cooks = dish
                .find_related(entity::prelude::Cook)
                .order_by_asc(entity::cook::Column::Username)
                .all(self.db)
                .await?;

            listings.push(DishListing {
                dish,
                dish_type,
                cooks,
            });
        }

        Ok(listings)
    }

    /// Full detail for one dish, or None if the id does not resolve.
    pub async fn detail(&self, dish_id: i32) -> Result<Option<DishDetail>, DbErr> {
        let dish = match self.get(dish_id).await? {
            Some(dish) => dish,
            None => return Ok(None),
        };

        let dish_type = dish
            .find_related(entity::prelude::DishType)
            .one(self.db)
            .await?;
        let cooks = dish
            .find_related(entity::prelude::Cook)
            .order_by_asc(entity::cook::Column::Username)
            .all(self.db)
            .await?;
        let ingredients = dish
            .find_related(entity::prelude::Ingredient)
            .order_by_asc(entity::ingredient::Column::Id)
            .all(self.db)
            .await?;

        Ok(Some(DishDetail {
            dish,
            dish_type,
            cooks,
            ingredients,
        }))
    }

    /// IDs of the dish's current ingredients, for the update form.
    pub async fn ingredient_ids(&self, dish_id: i32) -> Result<Vec<i32>, DbErr> {
        let rows = entity::prelude::DishIngredient::find()
            .filter(entity::dish_ingredient::Column::DishId.eq(dish_id))
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.ingredient_id).collect())
    }

    /// Whether the cook is currently assigned to the dish.
    pub async fn contains_cook(&self, dish_id: i32, cook_id: i32) -> Result<bool, DbErr> {
        let membership = entity::prelude::DishCook::find_by_id((dish_id, cook_id))
            .one(self.db)
            .await?;

        Ok(membership.is_some())
    }

    /// Flips the cook's membership in the dish's cook set: an assigned
    /// cook is removed, an unassigned one is added. Returns the new
    /// membership state.
    pub async fn toggle_cook(&self, dish_id: i32, cook_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let membership = entity::prelude::DishCook::find_by_id((dish_id, cook_id))
            .one(&txn)
            .await?;

        let assigned = match membership {
            Some(membership) => {
                membership.delete(&txn).await?;
                false
            }
            None => {
                let membership = entity::dish_cook::ActiveModel {
                    dish_id: ActiveValue::Set(dish_id),
                    cook_id: ActiveValue::Set(cook_id),
                };
                membership.insert(&txn).await?;
                true
            }
        };

        txn.commit().await?;

        Ok(assigned)
    }
}
