//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! Nothing in here touches HTTP.

mod entity;
mod item;
mod page;
mod user;

pub use entity::{DomainError, DomainResult, Entity};
pub use item::{search_key, Item, NewItem};
pub use page::{
    CategoryFilter, ItemQuery, Page, PageParams, SortOrder, ALL_CATEGORIES, DEFAULT_LIMIT,
    MAX_LIMIT,
};
pub use user::{hash_password, normalize_email, Account, LoginForm, SignupForm, User};
