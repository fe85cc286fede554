use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use tera::Context;
use tower_sessions::Session;

use crate::{
    controller::util::require_cook,
    data::{
        catalog,
        dish::DishRepository,
        dish_type::DishTypeRepository,
        ingredient::IngredientRepository,
    },
    error::Error,
    model::{
        app::AppState,
        form::{DishForm, FieldErrors, SearchParams},
    },
    service::{dish::DishService, Submission},
    view::render,
};

/// Paginated dish list with each dish's type and assigned cooks,
/// filterable by a name substring.
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let page =
        catalog::search_page::<entity::prelude::Dish>(&state.db, params.filter(), params.page())
            .await?;

    let dishes = DishRepository::new(&state.db).listing(page.items).await?;

    let mut context = Context::new();
    context.insert("dishes", &dishes);
    context.insert("page", &page.page);
    context.insert("num_pages", &page.num_pages);
    context.insert("total", &page.total);
    context.insert("search_name", params.echo());

    render(&state.templates, "dish_list.html", &context)
}

/// Dish detail: type, ingredients, assigned cooks, and whether the acting
/// cook is among them (drives the toggle button label).
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    Path(dish_id): Path<i32>,
) -> Result<Response, Error> {
    let acting_cook = require_cook(&state.db, &session).await?;

    let dish_repository = DishRepository::new(&state.db);

    let detail = dish_repository
        .detail(dish_id)
        .await?
        .ok_or(Error::NotFound("Dish"))?;

    let assigned = dish_repository.contains_cook(dish_id, acting_cook.id).await?;

    let mut context = Context::new();
    context.insert("dish", &detail.dish);
    context.insert("dish_type", &detail.dish_type);
    context.insert("cooks", &detail.cooks);
    context.insert("ingredients", &detail.ingredients);
    context.insert("assigned", &assigned);

    render(&state.templates, "dish_detail.html", &context)
}

pub async fn create_form(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    render_form(&state, &DishForm::default(), &FieldErrors::default()).await
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<DishForm>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    save(&state, None, form).await
}

pub async fn update_form(
    State(state): State<AppState>,
    session: Session,
    Path(dish_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let dish_repository = DishRepository::new(&state.db);

    let dish = dish_repository
        .get(dish_id)
        .await?
        .ok_or(Error::NotFound("Dish"))?;
    let ingredient_ids = dish_repository.ingredient_ids(dish_id).await?;

    let form = DishForm {
        name: dish.name,
        description: dish.description,
        price: dish.price.to_string(),
        dish_type: dish.dish_type_id.to_string(),
        ingredients: ingredient_ids,
    };

    render_form(&state, &form, &FieldErrors::default()).await
}

pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(dish_id): Path<i32>,
    Form(form): Form<DishForm>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    save(&state, Some(dish_id), form).await
}

/// Shared create/update path: validate, submit, and either redirect to the
/// list or redisplay the form with its field errors.
async fn save(state: &AppState, dish_id: Option<i32>, form: DishForm) -> Result<Response, Error> {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(errors) => return render_form(state, &form, &errors).await,
    };

    match DishService::new(&state.db).save(dish_id, submission).await? {
        Submission::Saved(_) => Ok(Redirect::to("/dishes/").into_response()),
        Submission::Invalid(errors) => render_form(state, &form, &errors).await,
    }
}

/// Confirmation prompt; only the POST deletes.
pub async fn delete_form(
    State(state): State<AppState>,
    session: Session,
    Path(dish_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let dish = DishRepository::new(&state.db)
        .get(dish_id)
        .await?
        .ok_or(Error::NotFound("Dish"))?;

    let mut context = Context::new();
    context.insert("kind", "dish");
    context.insert("name", &dish.name);

    render(&state.templates, "confirm_delete.html", &context)
}

pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(dish_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let result = DishRepository::new(&state.db).delete(dish_id).await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound("Dish"));
    }

    Ok(Redirect::to("/dishes/").into_response())
}

/// Flips the acting cook's assignment to the dish, then returns to the
/// dish detail page.
pub async fn toggle_assign(
    State(state): State<AppState>,
    session: Session,
    Path(dish_id): Path<i32>,
) -> Result<Response, Error> {
    let acting_cook = require_cook(&state.db, &session).await?;

    DishService::new(&state.db)
        .toggle_assignment(dish_id, acting_cook.id)
        .await?;

    Ok(Redirect::to(&format!("/dish/{dish_id}/")).into_response())
}

/// The dish form needs the full dish-type and ingredient collections for
/// its selects regardless of the submission outcome.
async fn render_form(
    state: &AppState,
    form: &DishForm,
    errors: &FieldErrors,
) -> Result<Response, Error> {
    let dish_types = DishTypeRepository::new(&state.db).all().await?;
    let ingredients = IngredientRepository::new(&state.db).all().await?;

    let mut context = Context::new();
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("dish_types", &dish_types);
    context.insert("ingredients", &ingredients);

    render(&state.templates, "dish_form.html", &context)
}
