//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity, Item, ItemQuery, NewItem, Page, SignupForm, User};

/// Core read operations shared by every repository
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Count all stored entities
    async fn count(&self) -> DomainResult<u64>;
}

/// The catalog: filtered, sorted, paginated reads over items
#[async_trait]
pub trait CatalogRepository: Repository<Item> {
    /// One page of matching items plus the total number of matches.
    ///
    /// Either the whole page is returned or an error; never a partial page.
    async fn query(&self, query: &ItemQuery) -> DomainResult<Page<Item>>;

    /// Distinct category values, ascending
    async fn categories(&self) -> DomainResult<Vec<String>>;

    /// Insert items in one transaction, returning how many were written
    async fn insert_many(&self, items: &[NewItem]) -> DomainResult<u64>;
}

/// Accounts for the toy login/signup forms
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Create an account; a taken email is a `Conflict`
    async fn create(&self, form: &SignupForm) -> DomainResult<User>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
}
