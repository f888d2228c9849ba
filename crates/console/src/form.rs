use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use retaildesk_core::ItemId;
use retaildesk_inventory::{InventoryItem, ItemFields};

/// Add/edit form for catalog items.
///
/// `editing` names the item a save will update; `None` means a save adds a
/// new item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    pub editing: Option<ItemId>,
    pub fields: ItemFields,
}

impl ItemForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            editing: None,
            fields: ItemFields::blank(today),
        }
    }

    /// Load an existing item for editing.
    pub fn load(item: &InventoryItem) -> Self {
        Self {
            editing: Some(item.id),
            fields: item.fields.clone(),
        }
    }

    /// Keep whatever was typed, set the barcode and switch to "add" mode.
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.fields.barcode = barcode.into();
        self.editing = None;
        self
    }
}
