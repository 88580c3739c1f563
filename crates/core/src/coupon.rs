//! Coupon discounts and checkout totals.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Money, Timestamp};

/// How a coupon's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is a percentage of the subtotal (0-100).
    Percent,
    /// `value` is a flat amount.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub kind: DiscountKind,
    pub value: Money,
    #[serde(default)]
    pub min_order_amount: Money,
    /// Upper bound for percentage discounts.
    #[serde(default)]
    pub max_discount: Option<Money>,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl Coupon {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }

    /// Discount this coupon grants on `subtotal` at time `now`.
    ///
    /// The result never exceeds the subtotal.
    pub fn discount_for(&self, subtotal: Money, now: Timestamp) -> Result<Money, CoreError> {
        if self.is_expired(now) {
            return Err(CoreError::Validation(format!(
                "Coupon '{}' has expired",
                self.code
            )));
        }
        if subtotal < self.min_order_amount {
            return Err(CoreError::Validation(format!(
                "Coupon '{}' requires a minimum order of {} (got {})",
                self.code, self.min_order_amount, subtotal
            )));
        }

        let raw = match self.kind {
            DiscountKind::Percent => {
                let pct = self.value.clamp(0, 100);
                let amount = subtotal.saturating_mul(pct) / 100;
                match self.max_discount {
                    Some(cap) => amount.min(cap),
                    None => amount,
                }
            }
            DiscountKind::Fixed => self.value.max(0),
        };

        Ok(raw.min(subtotal.max(0)))
    }
}

/// Monetary breakdown shown at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal_amount: Money,
    pub shipping_fee: Money,
    pub discount_amount: Money,
    pub final_total: Money,
}

impl CheckoutTotals {
    /// `final = subtotal + shipping - discount`, floored at zero.
    pub fn compute(subtotal: Money, shipping_fee: Money, discount: Money) -> Self {
        let final_total = subtotal
            .saturating_add(shipping_fee)
            .saturating_sub(discount)
            .max(0);
        Self {
            subtotal_amount: subtotal,
            shipping_fee,
            discount_amount: discount,
            final_total,
        }
    }
}
