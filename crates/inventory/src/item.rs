use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use retaildesk_core::{DomainError, DomainResult, ItemId};

/// Editable attributes of a catalog item (everything except its identifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
    pub name: String,
    pub sku: String,
    pub barcode: String,
    pub category: String,
    pub stock: u32,
    pub reorder_point: u32,
    pub price: Decimal,
    pub unit: String,
    pub supplier: String,
    /// Units in transit from the supplier.
    pub incoming: u32,
    pub last_restock: NaiveDate,
    pub description: String,
}

impl ItemFields {
    /// Blank form values, restock date set to `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            sku: String::new(),
            barcode: String::new(),
            category: String::new(),
            stock: 0,
            reorder_point: 0,
            price: Decimal::ZERO,
            unit: String::new(),
            supplier: String::new(),
            incoming: 0,
            last_restock: today,
            description: String::new(),
        }
    }

    /// Required-field rules shared by add and update.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty()
            || self.sku.trim().is_empty()
            || self.barcode.trim().is_empty()
        {
            return Err(DomainError::validation("Name, SKU, and barcode are required."));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_point
    }
}

/// A catalog entry.
///
/// Items are only ever handed out by shared reference or clone; the catalog
/// owns the authoritative copy and the identifier never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub fields: ItemFields,
}

impl InventoryItem {
    pub fn new(id: ItemId, fields: ItemFields) -> Self {
        Self { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn sku(&self) -> &str {
        &self.fields.sku
    }

    pub fn barcode(&self) -> &str {
        &self.fields.barcode
    }

    pub fn category(&self) -> &str {
        &self.fields.category
    }

    pub fn stock(&self) -> u32 {
        self.fields.stock
    }

    pub fn reorder_point(&self) -> u32 {
        self.fields.reorder_point
    }

    pub fn price(&self) -> Decimal {
        self.fields.price
    }

    /// Invariant: an item needs replenishing once stock reaches the reorder point.
    pub fn is_low_stock(&self) -> bool {
        self.fields.is_low_stock()
    }

    /// Stock value at current price.
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.fields.stock) * self.fields.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fields() -> ItemFields {
        ItemFields {
            name: "Aura Soy Candle".to_string(),
            sku: "HM-CD-054".to_string(),
            barcode: "8901234000055".to_string(),
            price: dec!(599),
            stock: 4,
            reorder_point: 8,
            ..ItemFields::blank(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
        }
    }

    #[test]
    fn validate_accepts_complete_fields() {
        assert!(fields().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        for blank in ["name", "sku", "barcode"] {
            let mut f = fields();
            match blank {
                "name" => f.name = "  ".to_string(),
                "sku" => f.sku.clear(),
                _ => f.barcode.clear(),
            }
            match f.validate().unwrap_err() {
                DomainError::Validation(_) => {}
                other => panic!("Expected Validation error for blank {blank}, got {other:?}"),
            }
        }
    }

    #[test]
    fn validate_rejects_negative_price() {
        let f = ItemFields { price: dec!(-1), ..fields() };
        assert!(matches!(f.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn low_stock_includes_reorder_point() {
        let mut f = fields();
        f.stock = 8;
        assert!(f.is_low_stock());
        f.stock = 9;
        assert!(!f.is_low_stock());
    }

    #[test]
    fn stock_value_multiplies_price() {
        let item = InventoryItem::new(ItemId::new(), fields());
        assert_eq!(item.stock_value(), dec!(2396));
    }
}
