//! Item Repository
//!
//! SQLite-backed catalog. Page and count are read inside one transaction so
//! `total` always describes the same snapshot as `items`.

use async_trait::async_trait;
use rusqlite::{params, Row};

use super::db::DbState;
use super::traits::{CatalogRepository, Repository};
use crate::domain::{search_key, CategoryFilter, DomainResult, Item, ItemQuery, NewItem, Page};

const ITEM_COLUMNS: &str = "id, name, category, image_path, sequence";

/// Shared filter for page and count queries.
/// ?1 = folded, escaped search text ('' = no search), ?2 = category (NULL = all)
const ITEM_FILTER: &str =
    "(?1 = '' OR search_name LIKE '%' || ?1 || '%' ESCAPE '\\') AND (?2 IS NULL OR category = ?2)";

/// SQLite implementation of the catalog
#[derive(Clone)]
pub struct ItemRepository {
    db: DbState,
}

impl ItemRepository {
    pub fn new(db: DbState) -> Self {
        Self { db }
    }
}

/// Escape LIKE wildcards so the search text matches literally
pub(crate) fn escape_like(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len());
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        image_path: row.get(3)?,
        sequence: row.get(4)?,
    })
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>> {
        self.db
            .run(move |conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"))?;
                let mut rows = stmt.query_map(params![id], row_to_item)?;
                let item = rows.next().transpose()?;
                Ok(item)
            })
            .await
    }

    async fn count(&self) -> DomainResult<u64> {
        self.db
            .run(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
    }
}

#[async_trait]
impl CatalogRepository for ItemRepository {
    async fn query(&self, query: &ItemQuery) -> DomainResult<Page<Item>> {
        let search = escape_like(&search_key(&query.search));
        let category = match &query.category {
            CategoryFilter::All => None,
            CategoryFilter::Exact(c) => Some(c.clone()),
        };
        let order_by = query.sort.order_by();
        let limit = query.limit as i64;
        let offset = query.skip.min(i64::MAX as u64) as i64;

        self.db
            .run(move |conn| {
                let tx = conn.transaction()?;

                let total: i64 = tx.query_row(
                    &format!("SELECT COUNT(*) FROM items WHERE {ITEM_FILTER}"),
                    params![search, category],
                    |row| row.get(0),
                )?;

                let items = {
                    let mut stmt = tx.prepare(&format!(
                        "SELECT {ITEM_COLUMNS} FROM items WHERE {ITEM_FILTER} ORDER BY {order_by} LIMIT ?3 OFFSET ?4"
                    ))?;
                    let rows = stmt.query_map(params![search, category, limit, offset], row_to_item)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                };

                tx.commit()?;

                Ok(Page {
                    items,
                    total: total as u64,
                })
            })
            .await
    }

    async fn categories(&self) -> DomainResult<Vec<String>> {
        self.db
            .run(|conn| {
                let mut stmt = conn.prepare("SELECT DISTINCT category FROM items ORDER BY category ASC")?;
                let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
                let categories = rows.collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(categories)
            })
            .await
    }

    async fn insert_many(&self, items: &[NewItem]) -> DomainResult<u64> {
        let items = items.to_vec();
        self.db
            .run(move |conn| {
                let tx = conn.transaction()?;
                let mut written = 0u64;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO items (name, search_name, category, image_path, sequence) VALUES (?1, ?2, ?3, ?4, ?5)",
                    )?;
                    for item in &items {
                        written += stmt.execute(params![
                            item.name,
                            search_key(&item.name),
                            item.category,
                            item.image_path,
                            item.sequence
                        ])? as u64;
                    }
                }
                tx.commit()?;
                Ok(written)
            })
            .await
    }
}
