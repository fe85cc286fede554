//! Data access layer.
//!
//! Repositories wrap all database operations for one entity each; the
//! catalog module provides the shared search/pagination query both the
//! staff-facing list views and the admin surface run through. Join tables
//! are only reachable through repository operations, never directly.

pub mod catalog;
pub mod cook;
pub mod dish;
pub mod dish_type;
pub mod ingredient;
