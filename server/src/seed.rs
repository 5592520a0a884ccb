//! Catalog seeding
//!
//! Fills an empty store with deterministic placeholder rows on startup.

use tracing::info;

use crate::domain::{DomainResult, NewItem};
use crate::repository::CatalogRepository;

/// Placeholder rows `Item 1..=count`
pub fn placeholder_items(count: u32) -> Vec<NewItem> {
    (1..=count as i64).map(NewItem::placeholder).collect()
}

/// Seed `count` rows if the catalog is empty; returns rows written
pub async fn seed_if_empty<R>(repo: &R, count: u32) -> DomainResult<u64>
where
    R: CatalogRepository + ?Sized,
{
    if count == 0 {
        return Ok(0);
    }

    let existing = repo.count().await?;
    if existing > 0 {
        info!("Catalog already has {existing} items, skipping seed");
        return Ok(0);
    }

    let written = repo.insert_many(&placeholder_items(count)).await?;
    info!("Seeded {written} items");
    Ok(written)
}
