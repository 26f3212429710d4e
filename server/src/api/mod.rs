//! HTTP Surface
//!
//! Routes, handlers, and the wire types they speak.

mod handlers;
mod models;
mod routes;

pub use models::{ListQuery, ToggleRequest, ToggleResponse};
pub use routes::create_router;
