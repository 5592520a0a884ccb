//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Item data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub image_path: String,
    pub sequence: i64,
}

/// One page from `GET /api/items`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageResponse {
    pub items: Vec<Item>,
    /// Matches for the current filters, not the whole catalog
    pub total: u64,
}

/// Sort options understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    Insertion,
    #[default]
    Latest,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Latest,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::Insertion,
    ];

    /// Query-string value
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Insertion => "insertion",
            SortOrder::Latest => "latest",
            SortOrder::NameAsc => "az",
            SortOrder::NameDesc => "za",
        }
    }

    pub fn from_param(s: &str) -> Self {
        match s {
            "insertion" => SortOrder::Insertion,
            "az" => SortOrder::NameAsc,
            "za" => SortOrder::NameDesc,
            _ => SortOrder::Latest,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Insertion => "Insertion",
            SortOrder::Latest => "Latest",
            SortOrder::NameAsc => "A → Z",
            SortOrder::NameDesc => "Z → A",
        }
    }
}

/// Category select value meaning "no filter"
pub const ALL_CATEGORIES: &str = "all";

/// Everything that changes which items the loader shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub search: String,
    pub category: String,
    pub sort: SortOrder,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort: SortOrder::default(),
        }
    }
}

/// Query parameters of one page request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub skip: u64,
    pub limit: u32,
    pub search: String,
    pub category: String,
    pub sort: &'static str,
}

impl PageRequest {
    pub fn new(skip: u64, limit: u32, filters: &Filters) -> Self {
        Self {
            skip,
            limit,
            search: filters.search.clone(),
            category: filters.category.clone(),
            sort: filters.sort.as_param(),
        }
    }
}

/// Account echoed back by `/login` and `/signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_backend_json() {
        let json = r#"{"id":3,"name":"Item 3","category":"Category 3","imagePath":"https://x/3","sequence":3}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.image_path, "https://x/3");
        assert_eq!(item.sequence, 3);
    }

    #[test]
    fn test_unknown_sort_param_is_latest() {
        assert_eq!(SortOrder::from_param("bogus"), SortOrder::Latest);
        assert_eq!(SortOrder::from_param("za"), SortOrder::NameDesc);
    }

    #[test]
    fn test_page_request_carries_filters() {
        let filters = Filters {
            search: "Item 1".to_string(),
            category: "Category 2".to_string(),
            sort: SortOrder::NameDesc,
        };
        let req = PageRequest::new(40, 20, &filters);
        assert_eq!(req.skip, 40);
        assert_eq!(req.sort, "za");
        assert_eq!(req.category, "Category 2");
    }
}
