//! Inventory domain module.
//!
//! Catalog store, catalog queries and low-stock alert derivation,
//! implemented purely as deterministic domain logic (no IO, no UI, no storage).

pub mod alerts;
pub mod catalog;
pub mod item;
pub mod search;
pub mod seed;
pub mod summary;

pub use alerts::{AlertSeverity, StockAlert, derive_alerts};
pub use catalog::{
    AddItem, Catalog, CatalogChange, CatalogCommand, CatalogEvent, ItemAdded, ItemUpdated,
    UpdateItem,
};
pub use item::{InventoryItem, ItemFields};
pub use search::{CatalogQuery, CategoryFilter, UNCATEGORIZED, categories};
pub use seed::sample_catalog;
pub use summary::CatalogSummary;
