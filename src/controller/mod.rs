pub mod admin;
pub mod auth;
pub mod cook;
pub mod dish;
pub mod dish_type;
pub mod index;
pub mod ingredient;
pub mod util;
