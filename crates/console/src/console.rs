use chrono::{DateTime, Utc};

use retaildesk_core::DomainResult;
use retaildesk_inventory::Catalog;
use retaildesk_invoicing::InvoicePrinter;
use retaildesk_scanner::{BarcodeCapability, ScanFeed};

use crate::config::ConsoleConfig;
use crate::state::{Action, BackOffice, Outcome, reduce};

/// Stateful shell around [`reduce`].
///
/// Supplies the wall clock, forwards issued invoices to the printer and keeps
/// the single-line notice shown to the operator.
pub struct Console<P: InvoicePrinter> {
    state: BackOffice,
    printer: P,
    notice: Option<String>,
}

impl<P: InvoicePrinter> Console<P> {
    pub fn new(config: &ConsoleConfig, catalog: Catalog, printer: P) -> Self {
        let state = BackOffice::new(config, catalog, Utc::now());
        tracing::info!(
            items = state.catalog().len(),
            store = %config.store.name,
            "back office started"
        );
        Self {
            state,
            printer,
            notice: None,
        }
    }

    pub fn state(&self) -> &BackOffice {
        &self.state
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    /// Most recent operator notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn dispatch(&mut self, action: Action) -> DomainResult<Outcome> {
        self.dispatch_at(action, Utc::now())
    }

    /// Reduce `action` at an explicit time.
    pub fn dispatch_at(&mut self, action: Action, now: DateTime<Utc>) -> DomainResult<Outcome> {
        let transition = match reduce(&self.state, action, now) {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(error = %err, "action rejected");
                self.notice = Some(err.user_message().to_string());
                return Err(err);
            }
        };

        self.state = transition.state;
        let outcome = transition.outcome;
        self.notice = outcome.notice();

        match &outcome {
            Outcome::ItemAdded(item) => {
                tracing::info!(item_id = %item.id, sku = item.sku(), "catalog item added");
            }
            Outcome::ItemUpdated(item) => {
                tracing::info!(item_id = %item.id, stock = item.stock(), "catalog item updated");
            }
            Outcome::CouponApplied(coupon) => {
                tracing::info!(code = %coupon.code, "coupon applied");
            }
            Outcome::InvoiceIssued(issued) => {
                tracing::info!(
                    number = %issued.record.number(),
                    total = %issued.record.total(),
                    "invoice issued"
                );
                // Issuance stands even if printing fails.
                if let Err(err) = self.printer.print(&issued.document) {
                    tracing::warn!(error = %err, number = %issued.record.number(), "invoice print failed");
                    self.notice = Some(err.user_message().to_string());
                }
            }
            Outcome::ScannerError(message) => {
                tracing::warn!(%message, "scanner reported an error");
            }
            _ => {}
        }

        Ok(outcome)
    }

    /// Start a barcode capability, surfacing refusal as a notice.
    pub fn start_scanner(
        &mut self,
        scanner: &mut dyn BarcodeCapability,
    ) -> DomainResult<ScanFeed> {
        scanner
            .start()
            .inspect_err(|err| self.notice = Some(err.user_message().to_string()))
    }

    pub fn stop_scanner(&mut self, scanner: &mut dyn BarcodeCapability) {
        scanner.stop();
    }

    /// Feed every pending scan through the reducer, oldest first.
    pub fn process_scans(&mut self, feed: &ScanFeed) -> Vec<Outcome> {
        feed.drain()
            .into_iter()
            .filter_map(|event| self.dispatch(Action::Scan(event)).ok())
            .collect()
    }
}

impl<P: InvoicePrinter> core::fmt::Debug for Console<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Console")
            .field("state", &self.state)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}
