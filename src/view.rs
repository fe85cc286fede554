//! Template rendering helper shared by every handler.

use axum::response::{Html, IntoResponse, Response};
use tera::{Context, Tera};

use crate::error::Error;

/// Renders `name` with `context` into an HTML response.
pub fn render(templates: &Tera, name: &str, context: &Context) -> Result<Response, Error> {
    let body = templates.render(name, context)?;

    Ok(Html(body).into_response())
}
