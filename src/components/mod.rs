//! UI Components
//!
//! Reusable Leptos components.

mod auth_forms;
mod filter_bar;
mod gallery;
mod item_card;
mod nav_bar;
mod status_line;

pub use auth_forms::{LoginForm, SignupForm};
pub use filter_bar::FilterBar;
pub use gallery::Gallery;
pub use item_card::ItemCard;
pub use nav_bar::NavBar;
pub use status_line::StatusLine;
