//! `retaildesk-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog and
//! invoicing modules (no IO, no UI, no storage).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;
pub mod recent;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::{InvoiceRecordId, ItemId, LineId, LogEntryId};
pub use money::{TaxRate, format_amount};
pub use recent::RecentList;
