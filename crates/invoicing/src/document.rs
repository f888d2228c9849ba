//! Print hand-off.
//!
//! The core never renders markup. On issuance it builds an [`InvoiceDocument`]
//! (a flat bundle of everything the printout shows) and passes it to an
//! [`InvoicePrinter`].

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use retaildesk_core::{DomainError, DomainResult, format_amount};

use crate::coupon::Coupon;
use crate::line::InvoiceLine;

/// Seller details printed in the document header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    pub gstin: String,
    pub support: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "Velocity Retail Hub".to_string(),
            gstin: "29ABCDE1234F2Z5".to_string(),
            support: "hello@velocity.in".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLine {
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl TryFrom<&InvoiceLine> for DocumentLine {
    type Error = DomainError;

    fn try_from(line: &InvoiceLine) -> Result<Self, Self::Error> {
        let name = match line.display_name() {
            "" => "-".to_string(),
            name => name.to_string(),
        };
        Ok(Self {
            name,
            quantity: line.quantity,
            price: line.price,
            discount: line.discount,
            total: line.line_total()?,
        })
    }
}

/// Everything a printed invoice shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub notes: String,
    pub lines: Vec<DocumentLine>,
    pub subtotal: Decimal,
    pub coupon: Option<Coupon>,
    pub deduction: Decimal,
    /// Whole-percent label for the tax row, e.g. `"18"`.
    pub tax_percent: String,
    pub tax: Decimal,
    pub grand_total: Decimal,
    pub issued_at: DateTime<Utc>,
    pub store: StoreProfile,
    pub currency_symbol: String,
}

impl InvoiceDocument {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Amount formatted with this document's currency, two places.
    pub fn money(&self, amount: Decimal) -> String {
        format_amount(&self.currency_symbol, amount)
    }
}

/// Print/export capability.
pub trait InvoicePrinter {
    fn print(&self, document: &InvoiceDocument) -> DomainResult<()>;
}

/// In-memory printer that keeps every document it receives.
#[derive(Debug, Default)]
pub struct DocumentOutbox {
    documents: Mutex<Vec<InvoiceDocument>>,
}

impl DocumentOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Documents received so far, oldest first.
    pub fn documents(&self) -> Vec<InvoiceDocument> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }
}

impl InvoicePrinter for DocumentOutbox {
    fn print(&self, document: &InvoiceDocument) -> DomainResult<()> {
        let mut docs = self
            .documents
            .lock()
            .map_err(|_| DomainError::capability("document outbox is unavailable"))?;
        docs.push(document.clone());
        Ok(())
    }
}
