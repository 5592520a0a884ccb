//! HTTP Handlers
//!
//! Axum handlers, organized by domain.

mod auth_api;
mod item_api;


pub use auth_api::*;
pub use item_api::*;
