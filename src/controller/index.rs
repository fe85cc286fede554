use axum::{extract::State, response::Response};
use tera::Context;
use tower_sessions::Session;

use crate::{
    controller::util::require_cook,
    data::catalog,
    error::Error,
    model::{app::AppState, session::SessionVisitCount},
    view::render,
};

/// Landing page: live entity counts plus this session's visit counter.
pub async fn index(State(state): State<AppState>, session: Session) -> Result<Response, Error> {
    let cook = require_cook(&state.db, &session).await?;

    let num_visits = SessionVisitCount::increment(&session).await?;

    let num_cooks = catalog::count::<entity::prelude::Cook>(&state.db).await?;
    let num_dish_types = catalog::count::<entity::prelude::DishType>(&state.db).await?;
    let num_dishes = catalog::count::<entity::prelude::Dish>(&state.db).await?;

    let mut context = Context::new();
    context.insert("cook", &cook);
    context.insert("num_cooks", &num_cooks);
    context.insert("num_dish_types", &num_dish_types);
    context.insert("num_dishes", &num_dishes);
    context.insert("num_visits", &num_visits);

    render(&state.templates, "index.html", &context)
}
