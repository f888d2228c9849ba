use chrono::{DateTime, Utc};

/// Something that happened to the catalog or the invoice book.
///
/// Emitted by an aggregate's `handle`, folded in by its `apply`, then
/// recorded in the activity log.
pub trait Event: Clone + core::fmt::Debug {
    /// Dotted name, `<module>.<subject>.<verb>`, e.g. `"invoicing.invoice.issued"`.
    fn event_type(&self) -> &'static str;

    fn version(&self) -> u32 {
        1
    }

    /// Business time carried by the command that produced the event.
    fn occurred_at(&self) -> DateTime<Utc>;
}
