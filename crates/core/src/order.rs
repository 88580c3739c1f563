//! Orders and their line items.

use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;
use crate::types::{DbId, Money, Timestamp};

/// A single line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: DbId,
    pub product_id: DbId,
    #[serde(default)]
    pub variant_id: Option<DbId>,
    pub product_name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: i32,
    pub unit_price: Money,
}

impl OrderItem {
    /// Saturates instead of overflowing on absurd backend values.
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(Money::from(self.quantity))
    }
}

/// An order as returned by the backend.
///
/// The monetary breakdown is computed server-side. The client renders it and
/// can check it with [`Order::total_is_consistent`] but never corrects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub shipping_address: String,
    #[serde(default)]
    pub note: Option<String>,
    pub subtotal_amount: Money,
    pub shipping_fee: Money,
    #[serde(default)]
    pub discount_amount: Money,
    pub final_total: Money,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub cancel_reason: Option<String>,
    pub created_at: Timestamp,
}

impl Order {
    /// `subtotal + shipping fee - discount`, the value the backend should report.
    pub fn expected_final_total(&self) -> Money {
        self.subtotal_amount
            .saturating_add(self.shipping_fee)
            .saturating_sub(self.discount_amount)
    }

    /// Whether the reported final total matches the breakdown.
    pub fn total_is_consistent(&self) -> bool {
        self.final_total == self.expected_final_total()
    }

    /// Sum of line totals, which should equal `subtotal_amount`.
    pub fn items_subtotal(&self) -> Money {
        self.order_items
            .iter()
            .map(OrderItem::line_total)
            .fold(0, Money::saturating_add)
    }

    pub fn item_count(&self) -> i32 {
        self.order_items
            .iter()
            .map(|item| item.quantity)
            .fold(0, i32::saturating_add)
    }
}
