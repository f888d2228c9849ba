use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use retaildesk_core::{DomainError, DomainResult};

use crate::pricing::amount_overflow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    /// `value` percent of the subtotal.
    Percentage,
    /// `value` currency units, regardless of subtotal.
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub kind: CouponKind,
    pub value: Decimal,
    pub description: String,
}

impl Coupon {
    pub fn new(
        code: impl Into<String>,
        kind: CouponKind,
        value: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            kind,
            value,
            description: description.into(),
        }
    }

    /// Amount taken off `subtotal`. Not capped at the subtotal.
    pub fn deduction(&self, subtotal: Decimal) -> DomainResult<Decimal> {
        match self.kind {
            CouponKind::Percentage => self
                .value
                .checked_mul(subtotal)
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
                .ok_or_else(amount_overflow),
            CouponKind::Flat => Ok(self.value),
        }
    }
}

/// Read-only coupon reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
}

impl Default for CouponBook {
    fn default() -> Self {
        Self::standard()
    }
}

impl CouponBook {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons }
    }

    /// The store's published coupons.
    pub fn standard() -> Self {
        Self::new(vec![
            Coupon::new(
                "WELCOME10",
                CouponKind::Percentage,
                Decimal::from(10),
                "10% off for new customers",
            ),
            Coupon::new(
                "FREESHIP",
                CouponKind::Flat,
                Decimal::from(150),
                "Flat ₹150 off shipping charges",
            ),
            Coupon::new(
                "BULK500",
                CouponKind::Flat,
                Decimal::from(500),
                "₹500 off on orders above ₹10,000",
            ),
        ])
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Case-insensitive exact match on the trimmed code.
    pub fn lookup(&self, code: &str) -> DomainResult<&Coupon> {
        let wanted = code.trim().to_lowercase();
        self.coupons
            .iter()
            .find(|c| c.code.to_lowercase() == wanted)
            .ok_or_else(|| DomainError::not_found("Coupon code not found."))
    }
}
