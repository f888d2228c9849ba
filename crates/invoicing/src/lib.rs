//! Invoicing domain module.
//!
//! Draft line editing, coupon lookup, invoice pricing and issuance,
//! implemented purely as deterministic domain logic (no IO, no UI, no storage).
//! Rendering and printing are handed off through [`InvoicePrinter`].

pub mod coupon;
pub mod document;
pub mod issuer;
pub mod line;
pub mod pricing;

pub use coupon::{Coupon, CouponBook, CouponKind};
pub use document::{DocumentLine, DocumentOutbox, InvoiceDocument, InvoicePrinter, StoreProfile};
pub use issuer::{
    HISTORY_CAP, InvoiceDraft, InvoiceIssued, InvoiceNumber, InvoiceRecord, Invoicing,
    InvoicingCommand, InvoicingEvent, IssueInvoice, IssuerSettings,
};
pub use line::{InvoiceLine, InvoiceLines, LinePatch};
pub use pricing::{InvoiceTotals, price};
