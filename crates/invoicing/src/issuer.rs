use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use retaildesk_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, InvoiceRecordId, RecentList, TaxRate,
    format_amount,
};
use retaildesk_events::{ActivityKind, ActivityNote, ActivitySource, Event};

use crate::coupon::{Coupon, CouponBook};
use crate::document::{DocumentLine, InvoiceDocument, StoreProfile};
use crate::line::InvoiceLines;
use crate::pricing::{InvoiceTotals, price};

/// Number of issued invoices kept in history.
pub const HISTORY_CAP: usize = 20;

/// Human invoice number: `INV-<YYYYMMDD>-<6-char suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub fn new(date: NaiveDate, suffix: &str) -> Self {
        Self(format!("INV-{}-{}", date.format("%Y%m%d"), suffix))
    }

    /// Number for an invoice issued at `at`, with a random suffix.
    ///
    /// Collisions are unlikely (16^6 suffixes per day) but not ruled out.
    pub fn generate(at: DateTime<Utc>) -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self::new(at.date_naive(), &hex[..6].to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of an issued invoice. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    id: InvoiceRecordId,
    number: InvoiceNumber,
    customer: String,
    total: Decimal,
    created_at: DateTime<Utc>,
    coupon_code: Option<String>,
}

impl InvoiceRecord {
    pub fn id(&self) -> InvoiceRecordId {
        self.id
    }

    pub fn number(&self) -> &InvoiceNumber {
        &self.number
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Grand total frozen at issuance.
    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }
}

/// Invoice being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub customer_name: String,
    pub customer_contact: String,
    pub notes: String,
    pub lines: InvoiceLines,
    coupon: Option<Coupon>,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Select a coupon from `book`. An unknown code leaves the selection as is.
    pub fn apply_coupon(&mut self, book: &CouponBook, code: &str) -> DomainResult<&Coupon> {
        let coupon = book.lookup(code)?.clone();
        Ok(self.coupon.insert(coupon))
    }

    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// Live totals for the draft.
    pub fn totals(&self, rate: TaxRate) -> DomainResult<InvoiceTotals> {
        price(self.lines.as_slice(), self.coupon.as_ref(), rate)
    }
}

/// Settings that shape issued invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerSettings {
    pub tax_rate: TaxRate,
    pub currency_symbol: String,
    pub store: StoreProfile,
    pub history_cap: usize,
}

impl Default for IssuerSettings {
    fn default() -> Self {
        Self {
            tax_rate: TaxRate::GST_18,
            currency_symbol: "₹".to_string(),
            store: StoreProfile::default(),
            history_cap: HISTORY_CAP,
        }
    }
}

/// Aggregate root: the invoice desk (current draft + issued history).
///
/// Each draft moves from drafting to issued exactly once; issuing snapshots
/// it into an [`InvoiceRecord`] and immediately opens a fresh draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoicing {
    settings: IssuerSettings,
    draft: InvoiceDraft,
    history: RecentList<InvoiceRecord>,
    version: u64,
}

impl Default for Invoicing {
    fn default() -> Self {
        Self::new(IssuerSettings::default())
    }
}

impl Invoicing {
    pub fn new(settings: IssuerSettings) -> Self {
        let history = RecentList::with_capacity(settings.history_cap);
        Self {
            settings,
            draft: InvoiceDraft::new(),
            history,
            version: 0,
        }
    }

    pub fn settings(&self) -> &IssuerSettings {
        &self.settings
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut InvoiceDraft {
        &mut self.draft
    }

    /// Issued invoices, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &InvoiceRecord> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn totals(&self) -> DomainResult<InvoiceTotals> {
        self.draft.totals(self.settings.tax_rate)
    }

    /// Issue the current draft under a fresh record id and invoice number.
    pub fn issue(&mut self, issued_at: DateTime<Utc>) -> DomainResult<InvoiceIssued> {
        let events = self.execute(&InvoicingCommand::IssueInvoice(IssueInvoice {
            record_id: InvoiceRecordId::new(),
            number: InvoiceNumber::generate(issued_at),
            issued_at,
        }))?;
        match events.into_iter().next() {
            Some(InvoicingEvent::InvoiceIssued(e)) => Ok(e),
            None => Err(DomainError::validation("invoice was not issued")),
        }
    }
}

impl AggregateRoot for Invoicing {
    type Id = ();

    fn id(&self) -> &Self::Id {
        &()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: IssueInvoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueInvoice {
    pub record_id: InvoiceRecordId,
    pub number: InvoiceNumber,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoicingCommand {
    IssueInvoice(IssueInvoice),
}

/// Event: InvoiceIssued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceIssued {
    pub record: InvoiceRecord,
    pub totals: InvoiceTotals,
    pub document: InvoiceDocument,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoicingEvent {
    InvoiceIssued(InvoiceIssued),
}

impl Event for InvoicingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InvoicingEvent::InvoiceIssued(_) => "invoicing.invoice.issued",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InvoicingEvent::InvoiceIssued(e) => e.occurred_at,
        }
    }
}

impl ActivitySource for InvoicingEvent {
    fn activity(&self) -> Vec<ActivityNote> {
        match self {
            InvoicingEvent::InvoiceIssued(e) => vec![ActivityNote::new(
                ActivityKind::Invoice,
                format!(
                    "Invoice {} generated for {} ({}).",
                    e.record.number,
                    e.record.customer,
                    format_amount(&e.document.currency_symbol, e.record.total)
                ),
            )],
        }
    }
}

impl Aggregate for Invoicing {
    type Command = InvoicingCommand;
    type Event = InvoicingEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InvoicingEvent::InvoiceIssued(e) => {
                self.history.push_front(e.record.clone());
                self.draft = InvoiceDraft::new();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InvoicingCommand::IssueInvoice(cmd) => self.handle_issue(cmd),
        }
    }
}

impl Invoicing {
    fn handle_issue(&self, cmd: &IssueInvoice) -> Result<Vec<InvoicingEvent>, DomainError> {
        let draft = &self.draft;
        if draft.customer_name.trim().is_empty() {
            return Err(DomainError::validation("Customer name is required for invoice."));
        }

        let billable = draft
            .lines
            .billable()
            .map(DocumentLine::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        if billable.is_empty() {
            return Err(DomainError::validation(
                "Add at least one product line to generate invoice.",
            ));
        }

        if self.history.iter().any(|r| r.id == cmd.record_id) {
            return Err(DomainError::conflict("invoice record id already in use"));
        }

        let totals = self.totals()?;
        let record = InvoiceRecord {
            id: cmd.record_id,
            number: cmd.number.clone(),
            customer: draft.customer_name.clone(),
            total: totals.grand_total,
            created_at: cmd.issued_at,
            coupon_code: draft.coupon.as_ref().map(|c| c.code.clone()),
        };
        let document = InvoiceDocument {
            invoice_number: cmd.number.to_string(),
            customer_name: draft.customer_name.clone(),
            customer_contact: draft.customer_contact.clone(),
            notes: draft.notes.clone(),
            lines: billable,
            subtotal: totals.subtotal,
            coupon: draft.coupon.clone(),
            deduction: totals.deduction,
            tax_percent: self.settings.tax_rate.percent_label(),
            tax: totals.tax,
            grand_total: totals.grand_total,
            issued_at: cmd.issued_at,
            store: self.settings.store.clone(),
            currency_symbol: self.settings.currency_symbol.clone(),
        };

        Ok(vec![InvoicingEvent::InvoiceIssued(InvoiceIssued {
            record,
            totals,
            document,
            occurred_at: cmd.issued_at,
        })])
    }
}
