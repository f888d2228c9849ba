//! Catalog filtering and category listing.

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Label used for items without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Category restriction for a catalog search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// No category filtering.
    #[default]
    All,
    /// Only items whose category equals this value exactly.
    Only(String),
}

impl From<&str> for CategoryFilter {
    /// `"all"` is the sentinel for no filtering; anything else is a category name.
    fn from(value: &str) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

/// Search parameters for the catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against name, SKU and barcode.
    pub text: String,
    pub category: CategoryFilter,
    pub low_stock_only: bool,
}

impl CatalogQuery {
    pub fn new(text: impl Into<String>, category: impl Into<CategoryFilter>, low_stock_only: bool) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            low_stock_only,
        }
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        let needle = self.text.to_lowercase();
        let matches_text = [item.name(), item.sku(), item.barcode()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
        let matches_category = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category() == category,
        };
        let matches_stock = !self.low_stock_only || item.is_low_stock();

        matches_text && matches_category && matches_stock
    }
}

/// Distinct categories in first-seen catalog order.
pub fn categories(items: &[InventoryItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        let category = if item.category().is_empty() {
            UNCATEGORIZED
        } else {
            item.category()
        };
        if !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}
