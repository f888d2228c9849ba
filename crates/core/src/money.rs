//! Money helpers.
//!
//! Amounts are `Decimal` and accumulate at full precision. Rounding to two
//! places happens only when an amount is formatted for display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Places shown when an amount is presented.
pub const DISPLAY_PLACES: u32 = 2;

/// Flat tax rate applied to the taxable base (e.g. `0.18` for 18% GST).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Standard 18% GST slab.
    pub const GST_18: TaxRate = TaxRate(Decimal::from_parts(18, 0, 0, false, 2));

    /// Build a rate from a fraction (`0.18`). Must lie in `[0, 1]`.
    pub fn new(fraction: Decimal) -> DomainResult<Self> {
        if fraction.is_sign_negative() || fraction > Decimal::ONE {
            return Err(DomainError::validation(format!(
                "tax rate must be between 0 and 1 (got {fraction})"
            )));
        }
        Ok(Self(fraction))
    }

    pub fn fraction(&self) -> Decimal {
        self.0
    }

    /// Whole-percent label, e.g. `"18"` for `0.18`.
    pub fn percent_label(&self) -> String {
        let mut pct = (self.0 * Decimal::ONE_HUNDRED).round_dp(0);
        pct.rescale(0);
        pct.to_string()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::GST_18
    }
}

/// Round an amount to display precision (half away from zero).
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_PLACES);
    rounded
}

/// Format an amount with a currency symbol, e.g. `₹1062.00`.
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    let rounded = round_for_display(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{symbol}{}", rounded.abs())
    } else {
        format!("{symbol}{}", rounded.abs())
    }
}
