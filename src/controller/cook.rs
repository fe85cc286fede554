use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    controller::util::require_cook,
    data::{catalog, cook::CookRepository},
    error::Error,
    model::{
        app::AppState,
        form::{CookCreationForm, CookSearchParams, ExperienceForm, FieldErrors},
    },
    service::{cook::CookService, Submission},
    view::render,
};

/// Paginated cook list, filterable by a username substring.
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CookSearchParams>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let page =
        catalog::search_page::<entity::prelude::Cook>(&state.db, params.filter(), params.page())
            .await?;

    let mut context = Context::new();
    context.insert("page", &page);
    context.insert("search_username", params.echo());

    render(&state.templates, "cook_list.html", &context)
}

/// Cook detail with their assigned dishes and each dish's type.
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    Path(cook_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let cook_repository = CookRepository::new(&state.db);

    let cook = cook_repository
        .get(cook_id)
        .await?
        .ok_or(Error::NotFound("Cook"))?;

    #[derive(serde::Serialize)]
    struct AssignedDish {
        dish: entity::dish::Model,
        dish_type: Option<entity::dish_type::Model>,
    }

    let dishes: Vec<AssignedDish> = cook_repository
        .dishes_with_types(&cook)
        .await?
        .into_iter()
        .map(|(dish, dish_type)| AssignedDish { dish, dish_type })
        .collect();

    let mut context = Context::new();
    context.insert("cook", &cook);
    context.insert("dishes", &dishes);

    render(&state.templates, "cook_detail.html", &context)
}

pub async fn create_form(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    render_creation_form(&state, &CookCreationForm::default(), &FieldErrors::default())
}

/// Registration-style creation of a new cook by an existing one.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CookCreationForm>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(errors) => return render_creation_form(&state, &form, &errors),
    };

    match CookService::new(&state.db).register(registration).await? {
        Submission::Saved(_) => Ok(Redirect::to("/cook/").into_response()),
        Submission::Invalid(errors) => render_creation_form(&state, &form, &errors),
    }
}

fn render_creation_form(
    state: &AppState,
    form: &CookCreationForm,
    errors: &FieldErrors,
) -> Result<Response, Error> {
    let mut context = Context::new();
    context.insert("form", form);
    context.insert("errors", errors);

    render(&state.templates, "cook_form.html", &context)
}

pub async fn update_form(
    State(state): State<AppState>,
    session: Session,
    Path(cook_id): Path<i32>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let cook = CookRepository::new(&state.db)
        .get(cook_id)
        .await?
        .ok_or(Error::NotFound("Cook"))?;

    let form = ExperienceForm {
        years_of_experience: cook
            .years_of_experience
            .map(|years| years.to_string())
            .unwrap_or_default(),
    };

    render_experience_form(&state, &cook, &form, &FieldErrors::default())
}

/// Updates a cook's years of experience within the accepted bounds.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(cook_id): Path<i32>,
    Form(form): Form<ExperienceForm>,
) -> Result<Response, Error> {
    require_cook(&state.db, &session).await?;

    let cook = CookRepository::new(&state.db)
        .get(cook_id)
        .await?
        .ok_or(Error::NotFound("Cook"))?;

    let years = match form.validate() {
        Ok(years) => years,
        Err(errors) => return render_experience_form(&state, &cook, &form, &errors),
    };

    CookService::new(&state.db)
        .update_experience(cook_id, years)
        .await?;

    Ok(Redirect::to("/cook/").into_response())
}

fn render_experience_form(
    state: &AppState,
    cook: &entity::cook::Model,
    form: &ExperienceForm,
    errors: &FieldErrors,
) -> Result<Response, Error> {
    let mut context = Context::new();
    context.insert("cook", cook);
    context.insert("form", form);
    context.insert("errors", errors);

    render(&state.templates, "cook_experience_form.html", &context)
}
