use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;

/// Stock below this count marks a fast mover...
const FAST_MOVING_STOCK_BELOW: u32 = 15;
/// ...provided its reorder point is at most this.
const FAST_MOVING_REORDER_AT_MOST: u32 = 20;

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_products: usize,
    pub total_units: u64,
    /// `Σ stock × price` at full precision.
    pub inventory_value: Decimal,
    pub incoming: u64,
    pub low_stock_count: usize,
    /// Names of items that are selling through quickly.
    pub fast_moving: Vec<String>,
}

impl CatalogSummary {
    pub fn of(items: &[InventoryItem]) -> Self {
        Self {
            total_products: items.len(),
            total_units: items.iter().map(|i| u64::from(i.stock())).sum(),
            inventory_value: items.iter().map(InventoryItem::stock_value).sum(),
            incoming: items.iter().map(|i| u64::from(i.fields.incoming)).sum(),
            low_stock_count: items.iter().filter(|i| i.is_low_stock()).count(),
            fast_moving: items
                .iter()
                .filter(|i| {
                    i.stock() < FAST_MOVING_STOCK_BELOW
                        && i.reorder_point() <= FAST_MOVING_REORDER_AT_MOST
                })
                .map(|i| i.name().to_string())
                .collect(),
        }
    }
}
