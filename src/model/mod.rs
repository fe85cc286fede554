//! Application state, typed session wrappers, and form types.

pub mod app;
pub mod form;
pub mod session;
