use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    controller::util::require_cook,
    data::{catalog, dish_type::DishTypeRepository},
    error::Error,
    model::{
        app::AppState,
        form::{FieldErrors, NameForm, SearchParams},
    },
    view::render,
};

/// Paginated dish-type list, filterable by a name substring.
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let page = catalog::search_page::<entity::prelude::DishType>(
        &state.db,
        params.filter(),
        params.page(),
    )
    .await?;

    let mut context = Context::new();
    context.insert("page", &page);
    context.insert("search_name", params.echo());

    render(&state.templates, "dish_type_list.html", &context)
}

/// Dish-type detail with the dishes belonging to it.
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    Path(dish_type_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let dish_type_repository = DishTypeRepository::new(&state.db);

    let dish_type = dish_type_repository
        .get(dish_type_id)
        .await?
        .ok_or(Error::NotFound("Dish type"))?;

    let dishes = dish_type_repository.dishes(&dish_type).await?;

    let mut context = Context::new();
    context.insert("dish_type", &dish_type);
    context.insert("dishes", &dishes);

    render(&state.templates, "dish_type_detail.html", &context)
}

pub async fn create_form(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    render_form(&state, &NameForm::default(), &FieldErrors::default())
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NameForm>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let name = match form.validate() {
        Ok(name) => name,
        Err(errors) => return render_form(&state, &form, &errors),
    };

    DishTypeRepository::new(&state.db).create(name).await?;

    Ok(Redirect::to("/dish-type/").into_response())
}

pub async fn update_form(
    State(state): State<AppState>,
    session: Session,
    Path(dish_type_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let dish_type = DishTypeRepository::new(&state.db)
        .get(dish_type_id)
        .await?
        .ok_or(Error::NotFound("Dish type"))?;

    let form = NameForm {
        name: dish_type.name,
    };

    render_form(&state, &form, &FieldErrors::default())
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(dish_type_id): Path<i32>,
    Form(form): Form<NameForm>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let name = match form.validate() {
        Ok(name) => name,
        Err(errors) => return render_form(&state, &form, &errors),
    };

    DishTypeRepository::new(&state.db)
        .update(dish_type_id, name)
        .await?
        .ok_or(Error::NotFound("Dish type"))?;

    Ok(Redirect::to("/dish-type/").into_response())
}

/// Confirmation prompt; only the POST deletes.
pub async fn delete_form(
    State(state): State<AppState>,
    session: Session,
    Path(dish_type_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let dish_type = DishTypeRepository::new(&state.db)
        .get(dish_type_id)
        .await?
        .ok_or(Error::NotFound("Dish type"))?;

    let mut context = Context::new();
    context.insert("kind", "dish type");
    context.insert("name", &dish_type.name);

    render(&state.templates, "confirm_delete.html", &context)
}

pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(dish_type_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let result = DishTypeRepository::new(&state.db)
        .delete(dish_type_id)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound("Dish type"));
    }

    Ok(Redirect::to("/dish-type/").into_response())
}

fn render_form(
    state: &AppState,
    form: &NameForm,
    errors: &FieldErrors,
) -> Result<Response, Error> {
    let mut context = Context::new();
    context.insert("kind", "dish type");
    context.insert("form", form);
    context.insert("errors", errors);

    render(&state.templates, "dish_type_form.html", &context)
}
