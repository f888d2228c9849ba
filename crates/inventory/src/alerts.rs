//! Low-stock alert derivation.

use serde::{Deserialize, Serialize};

use retaildesk_core::ItemId;

use crate::item::InventoryItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Stock is at or below the reorder point but not exhausted.
    Warning,
    /// Out of stock.
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    pub item_id: ItemId,
    pub severity: AlertSeverity,
    pub title: String,
    pub detail: String,
}

/// One alert per item with `stock <= reorder_point`, in catalog order.
///
/// Stateless: recompute after every catalog change.
pub fn derive_alerts(items: &[InventoryItem]) -> Vec<StockAlert> {
    items
        .iter()
        .filter(|item| item.is_low_stock())
        .map(|item| StockAlert {
            item_id: item.id,
            severity: if item.stock() == 0 {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            },
            title: format!("{} is running low", item.name()),
            detail: format!(
                "{} units left. Reorder point: {}",
                item.stock(),
                item.reorder_point()
            ),
        })
        .collect()
}
