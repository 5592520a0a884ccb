//! Item Commands
//!
//! Catalog queries against `/api/items` and `/api/categories`.

use crate::models::{PageRequest, PageResponse};

use super::{endpoint, read_json, FetchError};

pub async fn fetch_items(request: &PageRequest) -> Result<PageResponse, FetchError> {
    let response = reqwest::Client::new()
        .get(endpoint("/api/items"))
        .query(request)
        .send()
        .await?;
    read_json(response).await
}

pub async fn fetch_categories() -> Result<Vec<String>, FetchError> {
    let response = reqwest::Client::new()
        .get(endpoint("/api/categories"))
        .send()
        .await?;
    read_json(response).await
}
