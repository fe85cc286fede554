//! Staff-only administration surface. Every handler runs behind
//! [`require_staff`]; non-staff cooks get a 403 regardless of the route.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tera::Context;
use tower_sessions::Session;

use crate::{
    controller::util::require_staff,
    data::{
        catalog::{self, CatalogEntity, CatalogPage},
        cook::CookRepository,
    },
    error::Error,
    model::{
        app::AppState,
        form::{CookSearchParams, SearchParams},
    },
    view::render,
};

/// Dashboard with live counts of every catalog entity.
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    require_staff(&state.db, &session).await?;

    let num_cooks = catalog::count::<entity::prelude::Cook>(&state.db).await?;
    let num_dish_types = catalog::count::<entity::prelude::DishType>(&state.db).await?;
    let num_dishes = catalog::count::<entity::prelude::Dish>(&state.db).await?;
    let num_ingredients = catalog::count::<entity::prelude::Ingredient>(&state.db).await?;

    let mut context = Context::new();
    context.insert("num_cooks", &num_cooks);
    context.insert("num_dish_types", &num_dish_types);
    context.insert("num_dishes", &num_dishes);
    context.insert("num_ingredients", &num_ingredients);

    render(&state.templates, "admin/dashboard.html", &context)
}

/// Searchable cook list with per-row delete links.
pub async fn cook_list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CookSearchParams>,
) -> Result<Response, Error> {
    require_staff(&state.db, &session).await?;

    let page =
        catalog::search_page::<entity::prelude::Cook>(&state.db, params.filter(), params.page())
            .await?;

    let mut context = Context::new();
    context.insert("page", &page);
    context.insert("search_username", params.echo());

    render(&state.templates, "admin/cook_list.html", &context)
}

/// Confirmation prompt; only the POST deletes.
pub async fn cook_delete_form(
    State(state): State<AppState>,
    session: Session,
    Path(cook_id): Path<i32>,
) -> Result<Response, Error> {
    require_staff(&state.db, &session).await?;

    let cook = CookRepository::new(&state.db)
        .get(cook_id)
        .await?
        .ok_or(Error::NotFound("Cook"))?;

    let mut context = Context::new();
    context.insert("kind", "cook");
    context.insert("name", &cook.username);

    render(&state.templates, "confirm_delete.html", &context)
}

/// Deletes a cook; their dish assignments go with them, the dishes stay.
pub async fn cook_delete(
    State(state): State<AppState>,
    session: Session,
    Path(cook_id): Path<i32>,
) -> Result<Response, Error> {
    require_staff(&state.db, &session).await?;

    let result = CookRepository::new(&state.db).delete(cook_id).await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound("Cook"));
    }

    Ok(Redirect::to("/admin/cook/").into_response())
}

pub async fn dish_type_list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<Response, Error> {
    catalog_list::<entity::prelude::DishType>(&state, &session, params, "Dish types").await
}

pub async fn dish_list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<Response, Error> {
    catalog_list::<entity::prelude::Dish>(&state, &session, params, "Dishes").await
}

pub async fn ingredient_list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<Response, Error> {
    catalog_list::<entity::prelude::Ingredient>(&state, &session, params, "Ingredients").await
}

/// One read-only admin listing; all three entity lists share a template.
async fn catalog_list<E>(
    state: &AppState,
    session: &Session,
    params: SearchParams,
    title: &str,
) -> Result<Response, Error>
where
    E: CatalogEntity,
    E::Model: sea_orm::FromQueryResult + Sized + Send + Sync + Serialize,
{
    require_staff(&state.db, session).await?;

    let page: CatalogPage<E::Model> =
        catalog::search_page::<E>(&state.db, params.filter(), params.page()).await?;

    let mut context = Context::new();
    context.insert("title", title);
    context.insert("page", &page);
    context.insert("search_name", params.echo());

    render(&state.templates, "admin/catalog_list.html", &context)
}
