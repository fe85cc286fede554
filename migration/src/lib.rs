pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_cook_table;
mod m20250301_000002_create_dish_type_table;
mod m20250301_000003_create_dish_table;
mod m20250301_000004_create_ingredient_table;
mod m20250301_000005_create_dish_cook_table;
mod m20250301_000006_create_dish_ingredient_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_cook_table::Migration),
            Box::new(m20250301_000002_create_dish_type_table::Migration),
            Box::new(m20250301_000003_create_dish_table::Migration),
            Box::new(m20250301_000004_create_ingredient_table::Migration),
            Box::new(m20250301_000005_create_dish_cook_table::Migration),
            Box::new(m20250301_000006_create_dish_ingredient_table::Migration),
        ]
    }
}
