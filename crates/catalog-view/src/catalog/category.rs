//! Category vocabulary for the catalog filters.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatalogError;

/// A top-level category and its subcategories.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Category name.
    pub category: String,
    /// Subcategory names, in API order.
    #[serde(default)]
    pub subcategories: Vec<String>,
}

impl CategoryEntry {
    pub fn new(category: impl Into<String>, subcategories: Vec<String>) -> Self {
        Self {
            category: category.into(),
            subcategories,
        }
    }
}

/// The controlled category vocabulary served by the categories endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTree {
    entries: Vec<CategoryEntry>,
}

impl CategoryTree {
    /// Number of quick-pick chips shown above the product grid.
    pub const QUICK_PICKS: usize = 8;

    pub fn new(entries: Vec<CategoryEntry>) -> Self {
        Self { entries }
    }

    /// Build from a `{ categories: [...] }` payload or a bare array.
    ///
    /// Entries without a string `category` are skipped; a missing or
    /// non-array `subcategories` field yields no subcategories.
    pub fn from_payload(payload: &Value) -> Self {
        let list = match payload {
            Value::Array(items) => Some(items),
            Value::Object(obj) => obj.get("categories").and_then(Value::as_array),
            _ => None,
        };

        let entries = list
            .map(|items| items.iter().filter_map(entry_from_value).collect())
            .unwrap_or_default();

        Self { entries }
    }

    /// All entries.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category names, in API order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    /// Subcategories for a category; empty for unknown or empty names.
    pub fn subcategories_for(&self, category: &str) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.subcategories.as_slice())
            .unwrap_or(&[])
    }

    /// The first `limit` category names.
    pub fn quick_picks(&self, limit: usize) -> Vec<&str> {
        self.names().take(limit).collect()
    }

    /// Keep `sub_category` only when it belongs to `category`.
    pub fn reconcile_subcategory(&self, category: &str, sub_category: &str) -> Option<String> {
        self.subcategories_for(category)
            .iter()
            .find(|s| s.as_str() == sub_category)
            .cloned()
    }
}

/// Parse a category payload from JSON text.
pub fn parse_categories(json: &str) -> Result<CategoryTree, CatalogError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(CategoryTree::from_payload(&value))
}

fn entry_from_value(value: &Value) -> Option<CategoryEntry> {
    let obj = value.as_object()?;
    let category = obj.get("category")?.as_str()?.to_string();
    let subcategories = obj
        .get("subcategories")
        .and_then(Value::as_array)
        .map(|subs| {
            subs.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some(CategoryEntry {
        category,
        subcategories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> CategoryTree {
        CategoryTree::from_payload(&json!({
            "categories": [
                { "category": "Shoes", "subcategories": ["Running", "Formal"] },
                { "category": "Apparel", "subcategories": ["Shirts"] },
                { "category": "Books" },
                { "name": "broken" }
            ]
        }))
    }

    #[test]
    fn test_from_payload() {
        let t = tree();
        assert_eq!(t.entries().len(), 3);
        assert_eq!(t.names().collect::<Vec<_>>(), vec!["Shoes", "Apparel", "Books"]);
    }

    #[test]
    fn test_bare_array() {
        let t = CategoryTree::from_payload(&json!([{ "category": "Toys" }]));
        assert_eq!(t.names().collect::<Vec<_>>(), vec!["Toys"]);
    }

    #[test]
    fn test_unexpected_payload_is_empty() {
        assert!(CategoryTree::from_payload(&json!("x")).is_empty());
        assert!(CategoryTree::from_payload(&json!({ "categories": 3 })).is_empty());
    }

    #[test]
    fn test_subcategories_for() {
        let t = tree();
        assert_eq!(t.subcategories_for("Shoes"), ["Running", "Formal"]);
        assert!(t.subcategories_for("Books").is_empty());
        assert!(t.subcategories_for("").is_empty());
        assert!(t.subcategories_for("Garden").is_empty());
    }

    #[test]
    fn test_quick_picks() {
        let entries = (0..12)
            .map(|i| CategoryEntry::new(format!("C{i}"), Vec::new()))
            .collect();
        let t = CategoryTree::new(entries);
        assert_eq!(t.quick_picks(CategoryTree::QUICK_PICKS).len(), 8);
        assert_eq!(t.quick_picks(3), vec!["C0", "C1", "C2"]);
    }

    #[test]
    fn test_reconcile_subcategory() {
        let t = tree();
        assert_eq!(
            t.reconcile_subcategory("Shoes", "Formal"),
            Some("Formal".to_string())
        );
        assert_eq!(t.reconcile_subcategory("Apparel", "Formal"), None);
    }

    #[test]
    fn test_parse_categories() {
        let t = parse_categories(r#"{"categories":[{"category":"Shoes"}]}"#).unwrap();
        assert_eq!(t.entries().len(), 1);
        assert!(parse_categories("nope").is_err());
    }
}
