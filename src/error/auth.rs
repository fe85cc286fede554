use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::controller::auth::LOGIN_PATH;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No cook ID is stored in the session.
    #[error("No cook is logged in for this session")]
    NotLoggedIn,
    /// The session carries a cook ID that no longer resolves to a row.
    /// The session is cleared before this error is returned.
    #[error("Cook ID {0} has an active session but no longer exists")]
    CookNotInDatabase(i32),
    /// The acting cook is not staff and may not use the admin surface.
    #[error("Cook ID {0} is not a staff member")]
    NotStaff(i32),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::NotLoggedIn | Self::CookNotInDatabase(_) => {
                Redirect::to(LOGIN_PATH).into_response()
            }
            Self::NotStaff(_) => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
        }
    }
}
