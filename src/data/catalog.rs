//! Generic listing queries over the catalog entities.
//!
//! [`CatalogEntity`] is a declarative listing descriptor: which column the
//! substring filter matches and which column gives the stable ordering.
//! [`search_page`] is the single implementation of filtered, paginated
//! listings; every list view (staff-facing and admin) is a consumer of it.

use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use serde::Serialize;

/// Number of entities shown per listing page.
pub const PAGE_SIZE: u64 = 5;

pub trait CatalogEntity: EntityTrait {
    /// Column matched by the list view's substring filter.
    fn search_column() -> Self::Column;

    /// Column giving the listing its stable ascending order.
    fn order_column() -> Self::Column;
}

impl CatalogEntity for entity::prelude::Cook {
    fn search_column() -> Self::Column {
        entity::cook::Column::Username
    }

    fn order_column() -> Self::Column {
        entity::cook::Column::Username
    }
}

impl CatalogEntity for entity::prelude::DishType {
    fn search_column() -> Self::Column {
        entity::dish_type::Column::Name
    }

    fn order_column() -> Self::Column {
        entity::dish_type::Column::Id
    }
}

impl CatalogEntity for entity::prelude::Dish {
    fn search_column() -> Self::Column {
        entity::dish::Column::Name
    }

    fn order_column() -> Self::Column {
        entity::dish::Column::Id
    }
}

impl CatalogEntity for entity::prelude::Ingredient {
    fn search_column() -> Self::Column {
        entity::ingredient::Column::Name
    }

    fn order_column() -> Self::Column {
        entity::ingredient::Column::Id
    }
}

/// One page of a filtered listing.
#[derive(Debug, Serialize)]
pub struct CatalogPage<M> {
    pub items: Vec<M>,
    pub page: u64,
    pub num_pages: u64,
    pub total: u64,
}

/// Case-insensitive literal substring match on `col`. The needle is not
/// escaped; matching is plain `LIKE` over lowercased operands.
fn contains_ci<C>(col: C, needle: &str) -> SimpleExpr
where
    C: ColumnTrait,
{
    Expr::expr(Func::lower(Expr::col(col))).like(format!("%{}%", needle.to_lowercase()))
}

/// Fetches one page of `E`'s listing, optionally filtered by a
/// case-insensitive substring on the entity's search column. Pages are
/// 1-based; an absent or empty filter returns the full collection.
pub async fn search_page<E>(
    db: &DatabaseConnection,
    filter: Option<&str>,
    page: u64,
) -> Result<CatalogPage<E::Model>, DbErr>
where
    E: CatalogEntity,
    E::Model: FromQueryResult + Sized + Send + Sync,
{
    let mut select = E::find().order_by_asc(E::order_column());

    if let Some(needle) = filter.filter(|needle| !needle.is_empty()) {
        select = select.filter(contains_ci(E::search_column(), needle));
    }

    let page = page.max(1);
    let paginator = select.paginate(db, PAGE_SIZE);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page - 1).await?;

    Ok(CatalogPage {
        items,
        page,
        num_pages: totals.number_of_pages,
        total: totals.number_of_items,
    })
}

/// Count of all rows of `E`, computed at call time.
pub async fn count<E>(db: &DatabaseConnection) -> Result<u64, DbErr>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync,
{
    E::find().count(db).await
}

#[cfg(test)]
mod tests {
    mod search_page_tests {
        use std::collections::HashSet;

        use galley_test_utils::prelude::*;

        use crate::data::catalog::{search_page, PAGE_SIZE};

        #[tokio::test]
        /// Expect every page to hold at most PAGE_SIZE items and the union
        /// over all pages to equal the full set with no duplicates
        async fn test_pagination_covers_all_items_without_duplicates() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            for n in 0..12 {
                factory::create_ingredient(&test.db, &format!("Ingredient {n:02}")).await?;
            }

            let mut seen = HashSet::new();
            let first = search_page::<entity::prelude::Ingredient>(&test.db, None, 1).await?;

            assert_eq!(first.total, 12);
            assert_eq!(first.num_pages, 3);

            for page in 1..=first.num_pages {
                let result =
                    search_page::<entity::prelude::Ingredient>(&test.db, None, page).await?;

                assert!(result.items.len() as u64 <= PAGE_SIZE);

                for item in result.items {
                    assert!(seen.insert(item.id), "item {} returned twice", item.id);
                }
            }

            assert_eq!(seen.len(), 12);

            Ok(())
        }

        #[tokio::test]
        /// Expect the filter to return exactly the entities whose field
        /// contains the needle, case-insensitively
        async fn test_filter_is_sound_and_complete() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            factory::create_ingredient(&test.db, "Tomato").await?;
            factory::create_ingredient(&test.db, "Sun-dried tomato").await?;
            factory::create_ingredient(&test.db, "Basil").await?;

            let result =
                search_page::<entity::prelude::Ingredient>(&test.db, Some("TOMA"), 1).await?;

            assert_eq!(result.total, 2);
            for item in &result.items {
                assert!(item.name.to_lowercase().contains("toma"));
            }

            Ok(())
        }

        #[tokio::test]
        /// Expect an empty filter to behave like no filter
        async fn test_empty_filter_returns_everything() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            factory::create_ingredient(&test.db, "Salt").await?;
            factory::create_ingredient(&test.db, "Pepper").await?;

            let unfiltered =
                search_page::<entity::prelude::Ingredient>(&test.db, None, 1).await?;
            let empty =
                search_page::<entity::prelude::Ingredient>(&test.db, Some(""), 1).await?;

            assert_eq!(unfiltered.total, 2);
            assert_eq!(empty.total, 2);

            Ok(())
        }

        #[tokio::test]
        /// Expect a dish search to return only the dish whose name matches,
        /// even when other dishes share its price
        async fn test_dish_search_matches_name_only() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            let dish_type = factory::create_dish_type(&test.db, "Soup").await?;
            factory::create_dish(&test.db, "Green Soup", "13.99", dish_type.id).await?;
            factory::create_dish(&test.db, "Borsch", "13.99", dish_type.id).await?;

            let result =
                search_page::<entity::prelude::Dish>(&test.db, Some("green"), 1).await?;

            assert_eq!(result.total, 1);
            assert_eq!(result.items[0].name, "Green Soup");

            Ok(())
        }

        #[tokio::test]
        /// Expect the cook listing to come back ordered by username
        async fn test_cook_listing_ordered_by_username() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            factory::create_cook(&test.db, "zoe").await?;
            factory::create_cook(&test.db, "amir").await?;
            factory::create_cook(&test.db, "mira").await?;

            let result = search_page::<entity::prelude::Cook>(&test.db, None, 1).await?;

            let usernames: Vec<&str> =
                result.items.iter().map(|c| c.username.as_str()).collect();

            assert_eq!(usernames, ["amir", "mira", "zoe"]);

            Ok(())
        }
    }

    mod count_tests {
        use galley_test_utils::prelude::*;

        use crate::data::catalog::count;

        #[tokio::test]
        /// Expect the count to reflect current storage state
        async fn test_count_tracks_inserts() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            assert_eq!(count::<entity::prelude::DishType>(&test.db).await?, 0);

            factory::create_dish_type(&test.db, "Soup").await?;
            factory::create_dish_type(&test.db, "Salad").await?;

            assert_eq!(count::<entity::prelude::DishType>(&test.db).await?, 2);

            Ok(())
        }
    }
}
