//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
mod item_repo;
mod traits;
mod user_repo;


pub use db::{init_db, open_connection, DbState};
pub use item_repo::ItemRepository;
pub use traits::{CatalogRepository, Repository, UserRepository};
pub use user_repo::SqliteUserRepository;
