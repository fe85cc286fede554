use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tera::Context;
use tower_sessions::Session;

use crate::{
    error::Error,
    model::{app::AppState, form::LoginForm, session::SessionCookId},
    service::cook::CookService,
    view::render,
};

pub const LOGIN_PATH: &str = "/accounts/login/";

pub const BAD_CREDENTIALS_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Renders the login form. An already-authenticated cook is sent home.
pub async fn login_form(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, Error> {
    if SessionCookId::get(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let mut context = Context::new();
    context.insert("form", &LoginForm::default());
    context.insert("error", "");

    render(&state.templates, "login.html", &context)
}

/// Checks the submitted credentials. Success stores the cook in the
/// session and redirects home; failure redisplays the form with a single
/// non-field message and no hint at which part was wrong.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, Error> {
    let cook = CookService::new(&state.db)
        .authenticate(&form.username, &form.password)
        .await?;

    let Some(cook) = cook else {
        let mut context = Context::new();
        context.insert("form", &form);
        context.insert("error", BAD_CREDENTIALS_MESSAGE);

        return render(&state.templates, "login.html", &context);
    };

    // A fresh session id on privilege change, so the pre-login session
    // cannot be replayed as an authenticated one.
    session.cycle_id().await?;
    SessionCookId::insert(&session, cook.id).await?;

    Ok(Redirect::to("/").into_response())
}

/// Clears the session and returns to the login page.
pub async fn logout(session: Session) -> Result<Response, Error> {
    session.clear().await;

    Ok(Redirect::to(LOGIN_PATH).into_response())
}
