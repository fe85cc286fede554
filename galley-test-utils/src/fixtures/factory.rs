use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};

use crate::error::TestError;

/// Password hash placeholder for fixture cooks that never log in. Tests
/// exercising the login flow register cooks through the cook service
/// instead so a real Argon2id hash is stored.
pub const UNUSABLE_PASSWORD_HASH: &str = "!unusable";

pub async fn create_cook(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entity::cook::Model, TestError> {
    create_cook_with_staff(db, username, false).await
}

pub async fn create_staff_cook(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entity::cook::Model, TestError> {
    create_cook_with_staff(db, username, true).await
}

async fn create_cook_with_staff(
    db: &DatabaseConnection,
    username: &str,
    is_staff: bool,
) -> Result<entity::cook::Model, TestError> {
    let cook = entity::cook::ActiveModel {
        username: ActiveValue::Set(username.to_string()),
        password_hash: ActiveValue::Set(UNUSABLE_PASSWORD_HASH.to_string()),
        first_name: ActiveValue::Set("Test".to_string()),
        last_name: ActiveValue::Set("Cook".to_string()),
        years_of_experience: ActiveValue::Set(Some(5)),
        is_staff: ActiveValue::Set(is_staff),
        ..Default::default()
    };

    Ok(cook.insert(db).await?)
}

pub async fn create_dish_type(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::dish_type::Model, TestError> {
    let dish_type = entity::dish_type::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        ..Default::default()
    };

    Ok(dish_type.insert(db).await?)
}

pub async fn create_dish(
    db: &DatabaseConnection,
    name: &str,
    price: &str,
    dish_type_id: i32,
) -> Result<entity::dish::Model, TestError> {
    let dish = entity::dish::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        description: ActiveValue::Set(format!("{name} description")),
        price: ActiveValue::Set(Decimal::from_str(price).expect("fixture price must parse")),
        dish_type_id: ActiveValue::Set(dish_type_id),
        ..Default::default()
    };

    Ok(dish.insert(db).await?)
}

pub async fn create_ingredient(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::ingredient::Model, TestError> {
    let ingredient = entity::ingredient::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        ..Default::default()
    };

    Ok(ingredient.insert(db).await?)
}
