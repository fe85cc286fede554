pub mod cook;
pub mod dish;
pub mod dish_cook;
pub mod dish_ingredient;
pub mod dish_type;
pub mod ingredient;

pub mod prelude {
    pub use super::cook::Entity as Cook;
    pub use super::dish::Entity as Dish;
    pub use super::dish_cook::Entity as DishCook;
    pub use super::dish_ingredient::Entity as DishIngredient;
    pub use super::dish_type::Entity as DishType;
    pub use super::ingredient::Entity as Ingredient;
}
