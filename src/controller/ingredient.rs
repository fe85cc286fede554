use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    controller::util::require_cook,
    data::{catalog, ingredient::IngredientRepository},
    error::Error,
    model::{
        app::AppState,
        form::{FieldErrors, NameForm, SearchParams},
    },
    view::render,
};

/// Paginated ingredient list, filterable by a name substring.
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let page = catalog::search_page::<entity::prelude::Ingredient>(
        &state.db,
        params.filter(),
        params.page(),
    )
    .await?;

    let mut context = Context::new();
    context.insert("page", &page);
    context.insert("search_name", params.echo());

    render(&state.templates, "ingredient_list.html", &context)
}

/// Ingredient detail with the dishes it appears in.
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    Path(ingredient_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let ingredient_repository = IngredientRepository::new(&state.db);

    let ingredient = ingredient_repository
        .get(ingredient_id)
        .await?
        .ok_or(Error::NotFound("Ingredient"))?;

    let dishes = ingredient_repository.dishes(&ingredient).await?;

    let mut context = Context::new();
    context.insert("ingredient", &ingredient);
    context.insert("dishes", &dishes);

    render(&state.templates, "ingredient_detail.html", &context)
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

    IngredientRepository::new(&state.db).create(name).await?;

    Ok(Redirect::to("/ingredients/").into_response())
}

pub async fn update_form(
    State(state): State<AppState>,
    session: Session,
    Path(ingredient_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let ingredient = IngredientRepository::new(&state.db)
        .get(ingredient_id)
        .await?
        .ok_or(Error::NotFound("Ingredient"))?;

    let form = NameForm {
        name: ingredient.name,
    };

    render_form(&state, &form, &FieldErrors::default())
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(ingredient_id): Path<i32>,
    Form(form): Form<NameForm>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let name = match form.validate() {
        Ok(name) => name,
        Err(errors) => return render_form(&state, &form, &errors),
    };

    IngredientRepository::new(&state.db)
        .update(ingredient_id, name)
        .await?
        .ok_or(Error::NotFound("Ingredient"))?;

    Ok(Redirect::to("/ingredients/").into_response())
}

/// Confirmation prompt; only the POST deletes.
pub async fn delete_form(
    State(state): State<AppState>,
    session: Session,
    Path(ingredient_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let ingredient = IngredientRepository::new(&state.db)
        .get(ingredient_id)
        .await?
        .ok_or(Error::NotFound("Ingredient"))?;

    let mut context = Context::new();
    context.insert("kind", "ingredient");
    context.insert("name", &ingredient.name);

    render(&state.templates, "confirm_delete.html", &context)
}

pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(ingredient_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let result = IngredientRepository::new(&state.db)
        .delete(ingredient_id)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound("Ingredient"));
    }

    Ok(Redirect::to("/ingredients/").into_response())
}

fn render_form(
    state: &AppState,
    form: &NameForm,
    errors: &FieldErrors,
) -> Result<Response, Error> {
    let mut context = Context::new();
    context.insert("kind", "ingredient");
    context.insert("form", form);
    context.insert("errors", errors);

    render(&state.templates, "ingredient_form.html", &context)
}
