use chrono::{TimeZone, Utc};
use retaildesk_console::{Action, Console, ConsoleConfig, Outcome};
use retaildesk_core::{DomainError, DomainResult};
use retaildesk_events::ActivityKind;
use retaildesk_inventory::{CatalogQuery, ItemFields, sample_catalog};
use retaildesk_invoicing::{DocumentOutbox, InvoiceDocument, InvoicePrinter, LinePatch};
use retaildesk_scanner::{BarcodeCapability, ChannelScanner, ScanEvent};
use rust_decimal_macros::dec;

fn console() -> Console<DocumentOutbox> {
    retaildesk_observability::init();
    Console::new(&ConsoleConfig::default(), sample_catalog(), DocumentOutbox::new())
}

fn hamper_patch() -> LinePatch {
    LinePatch {
        name: Some("Festive hamper".to_string()),
        quantity: Some(2),
        price: Some(dec!(500)),
        discount: Some(dec!(100)),
    }
}

struct JammedPrinter;

impl InvoicePrinter for JammedPrinter {
    fn print(&self, _document: &InvoiceDocument) -> DomainResult<()> {
        Err(DomainError::capability("Printer is out of paper."))
    }
}

#[test]
fn checkout_prints_invoice_and_resets_draft() -> anyhow::Result<()> {
    let mut console = console();
    let line_id = console.state().draft().lines.as_slice()[0].id;

    console.dispatch(Action::SetCustomerName("Meera Iyer".into()))?;
    console.dispatch(Action::SetCustomerContact("+91 98450 12345".into()))?;
    console.dispatch(Action::UpdateLine {
        line_id,
        patch: hamper_patch(),
    })?;

    let totals = console.state().totals()?;
    assert_eq!(totals.subtotal, dec!(900));
    assert_eq!(totals.tax, dec!(162));
    assert_eq!(totals.grand_total, dec!(1062));

    let outcome = console.dispatch(Action::IssueInvoice)?;
    let Outcome::InvoiceIssued(issued) = &outcome else {
        anyhow::bail!("expected an issued invoice, got {outcome:?}");
    };
    assert_eq!(console.notice(), Some(format!("Invoice {} generated.", issued.record.number()).as_str()));

    let printed = console.printer().documents();
    assert_eq!(printed.len(), 1);
    assert_eq!(printed[0].customer_contact, "+91 98450 12345");
    assert_eq!(printed[0].money(printed[0].grand_total), "₹1062.00");

    let history: Vec<_> = console.state().history().collect();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].customer(), "Meera Iyer");

    let logged = console.state().activity().latest().map(|e| e.message.clone());
    assert_eq!(
        logged.as_deref(),
        Some(format!("Invoice {} generated for Meera Iyer (₹1062.00).", issued.record.number()).as_str())
    );

    assert!(console.state().draft().customer_name.is_empty());
    assert_eq!(console.state().draft().lines.len(), 1);
    Ok(())
}

#[test]
fn coupons_change_the_total() -> anyhow::Result<()> {
    let mut console = console();
    let line_id = console.state().draft().lines.as_slice()[0].id;
    console.dispatch(Action::UpdateLine {
        line_id,
        patch: hamper_patch(),
    })?;

    console.dispatch(Action::ApplyCoupon(" freeship ".into()))?;
    assert_eq!(console.notice(), Some("Coupon FREESHIP applied successfully."));
    // 900 - 150 = 750 taxable, + 135 tax
    let totals = console.state().totals()?;
    assert_eq!(totals.taxable_base, dec!(750));
    assert_eq!(totals.grand_total, dec!(885));

    console.dispatch(Action::ApplyCoupon("WELCOME10".into()))?;
    assert_eq!(console.state().totals()?.deduction, dec!(90));
    assert_eq!(console.state().totals()?.grand_total, dec!(955.80));

    let err = console.dispatch(Action::ApplyCoupon("NOPE".into())).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
    assert_eq!(console.notice(), Some("Coupon code not found."));
    // The previously applied coupon survives a failed lookup.
    assert_eq!(console.state().draft().coupon().map(|c| c.code.as_str()), Some("WELCOME10"));

    console.dispatch(Action::RemoveCoupon)?;
    assert_eq!(console.state().totals()?.grand_total, dec!(1062));
    Ok(())
}

#[test]
fn rejected_invoice_leaves_history_and_log_alone() {
    let mut console = console();
    let line_id = console.state().draft().lines.as_slice()[0].id;
    console
        .dispatch(Action::UpdateLine {
            line_id,
            patch: hamper_patch(),
        })
        .unwrap();
    let before = console.state().clone();

    let err = console.dispatch(Action::IssueInvoice).unwrap_err();

    assert_eq!(err.user_message(), "Customer name is required for invoice.");
    assert_eq!(console.notice(), Some("Customer name is required for invoice."));
    assert_eq!(console.state(), &before);
    assert!(console.printer().documents().is_empty());
}

#[test]
fn blank_lines_alone_cannot_be_invoiced() {
    let mut console = console();
    console.dispatch(Action::SetCustomerName("Ravi".into())).unwrap();
    console.dispatch(Action::AddLine).unwrap();

    let err = console.dispatch(Action::IssueInvoice).unwrap_err();
    assert_eq!(
        err.user_message(),
        "Add at least one product line to generate invoice."
    );
    assert_eq!(console.state().history().count(), 0);
}

#[test]
fn print_failure_keeps_the_issued_invoice() -> anyhow::Result<()> {
    let mut console = Console::new(&ConsoleConfig::default(), sample_catalog(), JammedPrinter);
    let line_id = console.state().draft().lines.as_slice()[0].id;
    console.dispatch(Action::SetCustomerName("Kabir".into()))?;
    console.dispatch(Action::UpdateLine {
        line_id,
        patch: hamper_patch(),
    })?;

    let outcome = console.dispatch(Action::IssueInvoice)?;

    assert!(matches!(outcome, Outcome::InvoiceIssued(_)));
    assert_eq!(console.state().history().count(), 1);
    assert_eq!(console.notice(), Some("Printer is out of paper."));
    Ok(())
}

#[test]
fn scanning_drives_the_item_form() -> anyhow::Result<()> {
    let mut console = console();
    let mut scanner = ChannelScanner::new();
    let feed = console.start_scanner(&mut scanner)?;
    assert!(scanner.is_active());

    scanner.emit_decoded("8901234000031");
    let outcomes = console.process_scans(&feed);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(console.notice(), Some("Loaded Cold Brew Coffee Mix for editing."));
    assert!(console.state().form().editing.is_some());

    scanner.emit_error("Camera lost focus.");
    scanner.emit_decoded("4006381333931");
    let outcomes = console.process_scans(&feed);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(
        console.notice(),
        Some("Barcode captured. Fill remaining details to add item.")
    );
    assert!(console.state().form().editing.is_none());
    assert_eq!(console.state().form().fields.barcode, "4006381333931");

    console.stop_scanner(&mut scanner);
    assert!(!scanner.is_active());
    assert!(!scanner.emit_decoded("8901234000017"));
    Ok(())
}

#[test]
fn unavailable_scanner_surfaces_a_notice() {
    let mut console = console();
    let mut scanner = ChannelScanner::unavailable("Camera permission denied.");

    let err = console.start_scanner(&mut scanner).unwrap_err();

    assert!(matches!(err, DomainError::Capability(_)));
    assert_eq!(console.notice(), Some("Camera permission denied."));
    assert!(!scanner.is_active());
}

#[test]
fn new_item_from_scan_joins_catalog_and_search() -> anyhow::Result<()> {
    let mut console = console();
    let at = Utc.with_ymd_and_hms(2024, 5, 2, 11, 30, 0).unwrap();
    console.dispatch_at(Action::Scan(ScanEvent::Decoded("4006381333931".into())), at)?;

    let mut fields: ItemFields = console.state().form().fields.clone();
    fields.name = "Brass Diya".into();
    fields.sku = "HM-DY-009".into();
    fields.category = "Home & Living".into();
    fields.stock = 2;
    fields.reorder_point = 6;
    fields.price = dec!(349);
    console.dispatch_at(Action::SetFormFields(fields), at)?;
    console.dispatch_at(Action::SaveItem, at)?;

    let catalog = console.state().catalog();
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.items()[0].name(), "Brass Diya");

    let hits = console
        .state()
        .search(&CatalogQuery::new("hm-dy", "all", false));
    assert_eq!(hits.len(), 1);
    assert_eq!(console.state().alerts().len(), 3);

    let kinds: Vec<ActivityKind> = console.state().activity().entries().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ActivityKind::Alert, ActivityKind::Inventory, ActivityKind::System]
    );
    Ok(())
}

#[test]
fn oversized_line_is_refused_with_a_notice() -> anyhow::Result<()> {
    let mut console = console();
    let line_id = console.state().draft().lines.as_slice()[0].id;
    console.dispatch(Action::UpdateLine {
        line_id,
        patch: hamper_patch(),
    })?;

    let err = console
        .dispatch(Action::UpdateLine {
            line_id,
            patch: LinePatch {
                quantity: Some(i64::MAX),
                price: Some(rust_decimal::Decimal::new(10_000_000_000_000, 2)),
                ..LinePatch::default()
            },
        })
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(console.notice(), Some("Invoice amount is too large."));
    assert_eq!(console.state().totals()?.grand_total, dec!(1062));
    Ok(())
}
