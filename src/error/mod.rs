//! Error types for the Galley server.
//!
//! Validation failures are not represented here: they are field-scoped
//! [`FieldErrors`](crate::model::form::FieldErrors) that handlers feed back
//! into the rendered form with a success status. This module covers the
//! conditions that abort a request instead: missing authentication,
//! unresolvable identifiers, and infrastructure failures.

pub mod auth;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::error::auth::AuthError;

#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error (no session, stale session, missing privilege).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// An identifier in the request path did not resolve to a row.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Template rendering error.
    #[error(transparent)]
    TemplateError(#[from] tera::Error),
    /// Password hashing or verification error.
    #[error("Failed to process password: {0}")]
    PasswordHash(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::AuthError(err) => err.into_response(),
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Html(format!("<h1>Not Found</h1><p>{what} not found.</p>")),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response. The full
/// error is logged; the client only sees a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Internal server error</h1>"),
        )
            .into_response()
    }
}
