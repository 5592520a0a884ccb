//! HTTP handlers for the catalog
//!
//! `GET /api/items`, `GET /api/items/{id}` and `GET /api/categories`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::json;
use tracing::debug;

use crate::domain::{DomainError, Item, ItemQuery, Page, PageParams};
use crate::error::AppError;
use crate::repository::{CatalogRepository, Repository};
use crate::AppState;

/// One page of the catalog.
///
/// Bad numbers in the query string fall back to defaults instead of
/// rejecting the request. No retry on store failure.
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<Page<Item>>, AppError> {
    let query = ItemQuery::from_params(&PageParams::from_map(&raw));

    let page = state.items.query(&query).await?;
    debug!(
        skip = query.skip,
        limit = query.limit,
        sort = query.sort.as_str(),
        returned = page.items.len(),
        total = page.total,
        "Served item page"
    );

    Ok(Json(page))
}

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, AppError> {
    let item = state
        .items
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("item {id}")))?;
    Ok(Json(item))
}

/// Distinct categories for the filter dropdown
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.items.categories().await?))
}

/// Liveness plus catalog size
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, AppError> {
    let items = state.items.count().await?;
    Ok(Json(json!({ "status": "ok", "items": items })))
}
