//! Page Query Types
//!
//! Normalized pagination requests and the pages returned for them.
//! Malformed input never fails here; every field falls back to a default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 20;

/// Upper bound on items per page regardless of what the caller asks for
pub const MAX_LIMIT: u32 = 100;

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

/// Ordering of a page query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// `sequence` ascending
    #[default]
    Insertion,
    /// `sequence` descending
    Latest,
    /// `name` ascending
    #[serde(rename = "az")]
    NameAsc,
    /// `name` descending
    #[serde(rename = "za")]
    NameDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Insertion => "insertion",
            SortOrder::Latest => "latest",
            SortOrder::NameAsc => "az",
            SortOrder::NameDesc => "za",
        }
    }

    /// Unknown values fall back to insertion order.
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "latest" => SortOrder::Latest,
            "az" => SortOrder::NameAsc,
            "za" => SortOrder::NameDesc,
            _ => SortOrder::Insertion,
        }
    }

    /// ORDER BY clause; every order ends on `sequence ASC` so ties are stable.
    pub fn order_by(&self) -> &'static str {
        match self {
            SortOrder::Insertion => "sequence ASC",
            SortOrder::Latest => "sequence DESC",
            SortOrder::NameAsc => "name ASC, sequence ASC",
            SortOrder::NameDesc => "name DESC, sequence ASC",
        }
    }
}

/// Category restriction of a page query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(raw.to_string())
        }
    }
}

/// Raw query-string parameters, kept as strings so bad numbers never reject
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub skip: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl PageParams {
    /// Picks the known keys out of a decoded query string; others are ignored
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).cloned();
        Self {
            skip: get("skip"),
            limit: get("limit"),
            search: get("search"),
            category: get("category"),
            sort: get("sort"),
        }
    }
}

/// A normalized page request against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub skip: u64,
    pub limit: u32,
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            category: CategoryFilter::All,
            sort: SortOrder::Insertion,
        }
    }
}

impl ItemQuery {
    pub fn new(skip: u64, limit: u32) -> Self {
        Self {
            skip,
            limit: clamp_limit(limit as i64),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = CategoryFilter::parse(category);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Builds a query from raw parameters.
    ///
    /// Non-numeric or negative `skip` becomes 0; non-numeric, zero or
    /// negative `limit` becomes [`DEFAULT_LIMIT`]; larger than [`MAX_LIMIT`]
    /// is clamped.
    pub fn from_params(params: &PageParams) -> Self {
        let skip = params
            .skip
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(0) as u64;

        let limit = params
            .limit
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .map(clamp_limit)
            .unwrap_or(DEFAULT_LIMIT);

        Self {
            skip,
            limit,
            search: params.search.as_deref().unwrap_or("").trim().to_string(),
            category: CategoryFilter::parse(params.category.as_deref().unwrap_or(ALL_CATEGORIES)),
            sort: SortOrder::from_str(params.sort.as_deref().unwrap_or("")),
        }
    }
}

fn clamp_limit(limit: i64) -> u32 {
    if limit <= 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT as i64) as u32
    }
}

/// One page of results plus the filtered total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Count of all items matching the filter, ignoring skip/limit
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> PageParams {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PageParams::from_map(&map)
    }

    #[test]
    fn test_defaults_when_empty() {
        let q = ItemQuery::from_params(&PageParams::default());
        assert_eq!(q, ItemQuery::default());
        assert_eq!(q.limit, 20);
        assert_eq!(q.sort, SortOrder::Insertion);
        assert_eq!(q.category, CategoryFilter::All);
    }

    #[test]
    fn test_non_numeric_falls_back() {
        let q = ItemQuery::from_params(&params(&[("skip", "abc"), ("limit", "lots")]));
        assert_eq!(q.skip, 0);
        assert_eq!(q.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_negative_and_zero() {
        let q = ItemQuery::from_params(&params(&[("skip", "-5"), ("limit", "0")]));
        assert_eq!(q.skip, 0);
        assert_eq!(q.limit, DEFAULT_LIMIT);

        let q = ItemQuery::from_params(&params(&[("limit", "-3")]));
        assert_eq!(q.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_clamped() {
        let q = ItemQuery::from_params(&params(&[("limit", "1000")]));
        assert_eq!(q.limit, MAX_LIMIT);
        assert_eq!(ItemQuery::new(0, 5000).limit, MAX_LIMIT);
    }

    #[test]
    fn test_search_and_category_trimmed() {
        let q = ItemQuery::from_params(&params(&[
            ("search", "  Item 1 "),
            ("category", "Category 2"),
            ("sort", "latest"),
            ("page", "9"),
        ]));
        assert_eq!(q.search, "Item 1");
        assert_eq!(q.category, CategoryFilter::Exact("Category 2".to_string()));
        assert_eq!(q.sort, SortOrder::Latest);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(SortOrder::from_str("latest"), SortOrder::Latest);
        assert_eq!(SortOrder::from_str("az"), SortOrder::NameAsc);
        assert_eq!(SortOrder::from_str("za"), SortOrder::NameDesc);
        assert_eq!(SortOrder::from_str("insertion"), SortOrder::Insertion);
        assert_eq!(SortOrder::from_str("random"), SortOrder::Insertion);
    }

    #[test]
    fn test_category_all_and_empty() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Category 3"),
            CategoryFilter::Exact("Category 3".to_string())
        );
    }

    #[test]
    fn test_order_by_always_ties_on_sequence() {
        for sort in [SortOrder::NameAsc, SortOrder::NameDesc] {
            assert!(sort.order_by().ends_with("sequence ASC"));
        }
    }
}
