//! Application state aggregate and its reducer.

use chrono::{DateTime, Utc};

use retaildesk_core::{DomainError, DomainResult, ItemId, LineId};
use retaildesk_events::{ActivityKind, ActivityLog, ActivityNote};
use retaildesk_inventory::{
    Catalog, CatalogQuery, CatalogSummary, InventoryItem, ItemFields, StockAlert,
};
use retaildesk_invoicing::{
    Coupon, CouponBook, InvoiceDraft, InvoiceIssued, InvoiceRecord, InvoiceTotals, Invoicing,
    InvoicingEvent, LinePatch,
};
use retaildesk_scanner::ScanEvent;

use crate::config::ConsoleConfig;
use crate::form::ItemForm;

/// Everything the back office knows, in one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackOffice {
    catalog: Catalog,
    invoicing: Invoicing,
    coupons: CouponBook,
    activity: ActivityLog,
    form: ItemForm,
}

impl BackOffice {
    pub fn new(config: &ConsoleConfig, catalog: Catalog, now: DateTime<Utc>) -> Self {
        let mut activity = ActivityLog::with_capacity(config.activity_cap);
        activity.record(
            ActivityNote::new(
                ActivityKind::System,
                format!("Back office initialized with {} catalog items.", catalog.len()),
            ),
            now,
        );
        Self {
            catalog,
            invoicing: Invoicing::new(config.issuer_settings()),
            coupons: CouponBook::standard(),
            activity,
            form: ItemForm::blank(now.date_naive()),
        }
    }

    pub fn with_coupons(mut self, coupons: CouponBook) -> Self {
        self.coupons = coupons;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn coupons(&self) -> &CouponBook {
        &self.coupons
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn draft(&self) -> &InvoiceDraft {
        self.invoicing.draft()
    }

    pub fn invoicing(&self) -> &Invoicing {
        &self.invoicing
    }

    /// Live totals of the current draft.
    pub fn totals(&self) -> DomainResult<InvoiceTotals> {
        self.invoicing.totals()
    }

    /// Issued invoices, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &InvoiceRecord> {
        self.invoicing.history()
    }

    pub fn alerts(&self) -> Vec<StockAlert> {
        self.catalog.alerts()
    }

    pub fn summary(&self) -> CatalogSummary {
        self.catalog.summary()
    }

    pub fn search(&self, query: &CatalogQuery) -> Vec<&InventoryItem> {
        self.catalog.search(query)
    }
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Load a catalog item into the form.
    EditItem(ItemId),
    /// Replace the form's field values (the edit target is kept).
    SetFormFields(ItemFields),
    ResetForm,
    /// Add or update from the form, then reset it.
    SaveItem,
    Scan(ScanEvent),
    AddLine,
    UpdateLine { line_id: LineId, patch: LinePatch },
    SelectProduct { line_id: LineId, product_id: ItemId },
    SetCustomerName(String),
    SetCustomerContact(String),
    SetNotes(String),
    ApplyCoupon(String),
    RemoveCoupon,
    IssueInvoice,
}

/// What an accepted action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    FormLoaded { item_id: ItemId, name: String },
    FormUpdated,
    FormReset,
    ItemAdded(InventoryItem),
    ItemUpdated(InventoryItem),
    BarcodeCaptured(String),
    ScannerError(String),
    LineAdded(LineId),
    LineUpdated(LineId),
    DraftUpdated,
    CouponApplied(Coupon),
    CouponRemoved,
    InvoiceIssued(Box<InvoiceIssued>),
}

impl Outcome {
    /// Inline message for the operator, if the outcome warrants one.
    pub fn notice(&self) -> Option<String> {
        match self {
            Outcome::FormLoaded { name, .. } => Some(format!("Loaded {name} for editing.")),
            Outcome::BarcodeCaptured(_) => {
                Some("Barcode captured. Fill remaining details to add item.".to_string())
            }
            Outcome::ScannerError(message) => Some(message.clone()),
            Outcome::CouponApplied(coupon) => {
                Some(format!("Coupon {} applied successfully.", coupon.code))
            }
            Outcome::InvoiceIssued(issued) => {
                Some(format!("Invoice {} generated.", issued.record.number()))
            }
            _ => None,
        }
    }
}

/// Result of [`reduce`]: the successor state and what happened.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: BackOffice,
    pub outcome: Outcome,
}

/// Apply `action` to `state` at time `now`.
///
/// The input state is never modified; on error there is no successor.
pub fn reduce(state: &BackOffice, action: Action, now: DateTime<Utc>) -> DomainResult<Transition> {
    let mut next = state.clone();
    let outcome = next.step(action, now)?;
    Ok(Transition {
        state: next,
        outcome,
    })
}

impl BackOffice {
    fn step(&mut self, action: Action, now: DateTime<Utc>) -> DomainResult<Outcome> {
        match action {
            Action::EditItem(item_id) => self.load_item(item_id),
            Action::SetFormFields(fields) => {
                self.form.fields = fields;
                Ok(Outcome::FormUpdated)
            }
            Action::ResetForm => {
                self.form = ItemForm::blank(now.date_naive());
                Ok(Outcome::FormReset)
            }
            Action::SaveItem => self.save_item(now),
            Action::Scan(ScanEvent::Decoded(code)) => Ok(self.capture_barcode(code)),
            Action::Scan(ScanEvent::Error(message)) => Ok(Outcome::ScannerError(message)),
            Action::AddLine => {
                let line_id = self.invoicing.draft_mut().lines.add_line().id;
                Ok(Outcome::LineAdded(line_id))
            }
            Action::UpdateLine { line_id, patch } => {
                self.invoicing.draft_mut().lines.update_line(line_id, patch);
                self.invoicing.totals()?;
                Ok(Outcome::LineUpdated(line_id))
            }
            Action::SelectProduct {
                line_id,
                product_id,
            } => {
                self.invoicing
                    .draft_mut()
                    .lines
                    .bind_to_product(line_id, &self.catalog, product_id)?;
                self.invoicing.totals()?;
                Ok(Outcome::LineUpdated(line_id))
            }
            Action::SetCustomerName(name) => {
                self.invoicing.draft_mut().customer_name = name;
                Ok(Outcome::DraftUpdated)
            }
            Action::SetCustomerContact(contact) => {
                self.invoicing.draft_mut().customer_contact = contact;
                Ok(Outcome::DraftUpdated)
            }
            Action::SetNotes(notes) => {
                self.invoicing.draft_mut().notes = notes;
                Ok(Outcome::DraftUpdated)
            }
            Action::ApplyCoupon(code) => {
                let coupon = self
                    .invoicing
                    .draft_mut()
                    .apply_coupon(&self.coupons, &code)?
                    .clone();
                self.invoicing.totals()?;
                Ok(Outcome::CouponApplied(coupon))
            }
            Action::RemoveCoupon => {
                self.invoicing.draft_mut().remove_coupon();
                Ok(Outcome::CouponRemoved)
            }
            Action::IssueInvoice => self.issue_invoice(now),
        }
    }

    fn load_item(&mut self, item_id: ItemId) -> DomainResult<Outcome> {
        let item = self
            .catalog
            .get(item_id)
            .ok_or_else(|| DomainError::not_found(format!("no catalog item with id {item_id}")))?;
        self.form = ItemForm::load(item);
        Ok(Outcome::FormLoaded {
            item_id,
            name: item.name().to_string(),
        })
    }

    fn capture_barcode(&mut self, code: String) -> Outcome {
        match self.catalog.find_by_barcode(&code) {
            Some(item) => {
                self.form = ItemForm::load(item);
                Outcome::FormLoaded {
                    item_id: item.id,
                    name: item.name().to_string(),
                }
            }
            None => {
                self.form = self.form.clone().with_barcode(code.clone());
                Outcome::BarcodeCaptured(code)
            }
        }
    }

    fn save_item(&mut self, now: DateTime<Utc>) -> DomainResult<Outcome> {
        let fields = self.form.fields.clone();
        let editing = self.form.editing;
        let change = match editing {
            Some(item_id) => self.catalog.update(item_id, fields, now)?,
            None => self.catalog.add(fields, now)?,
        };
        change.record_into(&mut self.activity);
        self.form = ItemForm::blank(now.date_naive());

        Ok(match editing {
            Some(_) => Outcome::ItemUpdated(change.item),
            None => Outcome::ItemAdded(change.item),
        })
    }

    fn issue_invoice(&mut self, now: DateTime<Utc>) -> DomainResult<Outcome> {
        let issued = self.invoicing.issue(now)?;
        self.activity
            .record_event(&InvoicingEvent::InvoiceIssued(issued.clone()));
        Ok(Outcome::InvoiceIssued(Box::new(issued)))
    }
}
