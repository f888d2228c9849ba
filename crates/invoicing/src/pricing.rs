//! Invoice pricing.
//!
//! Pure and deterministic: the same lines, coupon and rate always give the
//! same totals. Amounts accumulate at full precision; round only for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use retaildesk_core::{DomainError, DomainResult, TaxRate};

use crate::coupon::Coupon;
use crate::line::InvoiceLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub deduction: Decimal,
    /// `subtotal - deduction`, floored at zero.
    pub taxable_base: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
}

/// Price a draft.
///
/// 1. `subtotal = Σ max(quantity × price − discount, 0)`
/// 2. `deduction` from the coupon, not capped at the subtotal
/// 3. `tax = max(subtotal − deduction, 0) × rate`
/// 4. `grand_total = max(subtotal − deduction + tax, 0)`
///
/// Fails with a validation error when an amount exceeds the decimal range.
pub fn price(
    lines: &[InvoiceLine],
    coupon: Option<&Coupon>,
    rate: TaxRate,
) -> DomainResult<InvoiceTotals> {
    let subtotal = lines.iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line.line_total()?)
            .ok_or_else(amount_overflow)
    })?;
    let deduction = match coupon {
        Some(c) => c.deduction(subtotal)?,
        None => Decimal::ZERO,
    };
    let net = subtotal
        .checked_sub(deduction)
        .ok_or_else(amount_overflow)?;
    let taxable_base = net.max(Decimal::ZERO);
    let tax = taxable_base
        .checked_mul(rate.fraction())
        .ok_or_else(amount_overflow)?;
    let grand_total = net
        .checked_add(tax)
        .ok_or_else(amount_overflow)?
        .max(Decimal::ZERO);

    Ok(InvoiceTotals {
        subtotal,
        deduction,
        taxable_base,
        tax,
        grand_total,
    })
}

pub(crate) fn amount_overflow() -> DomainError {
    DomainError::validation("Invoice amount is too large.")
}
