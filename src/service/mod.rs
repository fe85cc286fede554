//! Business rules sitting between handlers and repositories.
//!
//! Services own the write-path rules the database layer cannot express on
//! its own: password hashing, uniqueness checks surfaced as field errors,
//! and existence checks surfaced as [`Error::NotFound`](crate::error::Error).

pub mod cook;
pub mod dish;

use crate::model::form::FieldErrors;

/// Outcome of submitting a validated form to a service. A rejected
/// submission is not an [`Error`](crate::error::Error): the handler
/// redisplays the form with the field messages attached.
#[derive(Debug)]
pub enum Submission<T> {
    Saved(T),
    Invalid(FieldErrors),
}
