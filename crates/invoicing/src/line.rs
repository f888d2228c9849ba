use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use retaildesk_core::{DomainError, DomainResult, ItemId, LineId};
use retaildesk_inventory::{Catalog, InventoryItem};

use crate::pricing::amount_overflow;

/// One row of an invoice draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub id: LineId,
    /// Weak reference to a catalog item; resolve with [`InvoiceLine::product`].
    pub product_id: Option<ItemId>,
    pub name: String,
    /// Expected to be >= 1; non-positive quantities price at zero.
    pub quantity: i64,
    pub price: Decimal,
    /// Flat amount off this line.
    pub discount: Decimal,
}

impl InvoiceLine {
    /// Quantity 1, zero price and discount, unbound.
    pub fn blank() -> Self {
        Self {
            id: LineId::new(),
            product_id: None,
            name: String::new(),
            quantity: 1,
            price: Decimal::ZERO,
            discount: Decimal::ZERO,
        }
    }

    /// `max(quantity * price - discount, 0)`, or an error past the decimal range.
    pub fn line_total(&self) -> DomainResult<Decimal> {
        let gross = Decimal::from(self.quantity)
            .checked_mul(self.price)
            .and_then(|g| g.checked_sub(self.discount))
            .ok_or_else(amount_overflow)?;
        Ok(gross.max(Decimal::ZERO))
    }

    /// Name with surrounding whitespace removed.
    pub fn display_name(&self) -> &str {
        self.name.trim()
    }

    /// Counts toward issuance: positive quantity and either a non-blank name
    /// or a product.
    pub fn is_billable(&self) -> bool {
        self.quantity > 0 && (!self.display_name().is_empty() || self.product_id.is_some())
    }

    /// Look up the bound catalog item, if it still exists.
    pub fn product<'a>(&self, catalog: &'a Catalog) -> Option<&'a InventoryItem> {
        self.product_id.and_then(|id| catalog.get(id))
    }
}

/// Partial update for a line; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
    pub discount: Option<Decimal>,
}

impl LinePatch {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn discount(discount: Decimal) -> Self {
        Self {
            discount: Some(discount),
            ..Self::default()
        }
    }

    fn merge_into(self, line: &mut InvoiceLine) {
        if let Some(name) = self.name {
            line.name = name;
        }
        if let Some(quantity) = self.quantity {
            line.quantity = quantity;
        }
        if let Some(price) = self.price {
            line.price = price;
        }
        if let Some(discount) = self.discount {
            line.discount = discount;
        }
    }
}

/// Ordered, editable line list of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceLines(Vec<InvoiceLine>);

impl Default for InvoiceLines {
    /// A fresh draft starts with one blank line.
    fn default() -> Self {
        Self(vec![InvoiceLine::blank()])
    }
}

impl InvoiceLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<InvoiceLine>) -> Self {
        Self(lines)
    }

    pub fn as_slice(&self) -> &[InvoiceLine] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: LineId) -> Option<&InvoiceLine> {
        self.0.iter().find(|line| line.id == id)
    }

    /// Append a blank line and return it.
    pub fn add_line(&mut self) -> &InvoiceLine {
        self.0.push(InvoiceLine::blank());
        &self.0[self.0.len() - 1]
    }

    /// Merge `patch` into the line with `id`. Unknown ids are ignored.
    ///
    /// Returns whether a line was changed.
    pub fn update_line(&mut self, id: LineId, patch: LinePatch) -> bool {
        match self.0.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                patch.merge_into(line);
                true
            }
            None => false,
        }
    }

    /// Bind a line to a catalog item: copy its name and price and reset the
    /// discount to zero, discarding any manual discount.
    ///
    /// Fails with `NotFound` if the product is not in the catalog; an unknown
    /// line id is ignored like in [`InvoiceLines::update_line`].
    pub fn bind_to_product(
        &mut self,
        line_id: LineId,
        catalog: &Catalog,
        product_id: ItemId,
    ) -> DomainResult<()> {
        let product = catalog
            .get(product_id)
            .ok_or_else(|| DomainError::not_found(format!("no catalog item with id {product_id}")))?;

        if let Some(line) = self.0.iter_mut().find(|line| line.id == line_id) {
            line.product_id = Some(product.id);
            line.name = product.name().to_string();
            line.price = product.price();
            line.discount = Decimal::ZERO;
        }
        Ok(())
    }

    /// Lines that count toward issuance.
    pub fn billable(&self) -> impl Iterator<Item = &InvoiceLine> {
        self.0.iter().filter(|line| line.is_billable())
    }
}
