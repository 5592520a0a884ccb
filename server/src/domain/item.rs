//! Item Entity
//!
//! A single gallery entry. `sequence` defines canonical order and is
//! independent of the store-assigned `id`.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A catalog item as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Store-assigned identifier (opaque to clients)
    pub id: i64,
    pub name: String,
    pub category: String,
    pub image_path: String,
    /// Stable, unique ordering key
    pub sequence: i64,
}

/// An item that has not been written to the store yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub image_path: String,
    pub sequence: i64,
}

impl NewItem {
    /// Deterministic placeholder row used to seed an empty catalog.
    ///
    /// `n` is 1-based; categories cycle through `Category 1..=5`.
    pub fn placeholder(n: i64) -> Self {
        Self {
            name: format!("Item {n}"),
            category: format!("Category {}", ((n - 1) % 5) + 1),
            image_path: format!("https://picsum.photos/seed/item{n}/300/200"),
            sequence: n,
        }
    }
}

/// Case-folded form of a name or search text.
///
/// SQLite's `LIKE` only folds ASCII, so names are stored folded and
/// matched against folded search text.
pub fn search_key(text: &str) -> String {
    text.to_lowercase()
}

impl Entity for Item {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_key_folds_non_ascii() {
        assert_eq!(search_key("ÉCLAIR Straße"), "éclair straße");
    }

    #[test]
    fn test_placeholder_round_robin_categories() {
        assert_eq!(NewItem::placeholder(1).category, "Category 1");
        assert_eq!(NewItem::placeholder(5).category, "Category 5");
        assert_eq!(NewItem::placeholder(6).category, "Category 1");
        assert_eq!(NewItem::placeholder(100).category, "Category 5");
    }

    #[test]
    fn test_placeholder_fields() {
        let item = NewItem::placeholder(42);
        assert_eq!(item.name, "Item 42");
        assert_eq!(item.sequence, 42);
        assert_eq!(item.image_path, "https://picsum.photos/seed/item42/300/200");
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item {
            id: 7,
            name: "Item 7".to_string(),
            category: "Category 2".to_string(),
            image_path: "x.png".to_string(),
            sequence: 7,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["imagePath"], "x.png");
        assert_eq!(json["sequence"], 7);
        assert!(json.get("image_path").is_none());
    }
}
