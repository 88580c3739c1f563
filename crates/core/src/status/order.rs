//! Order statuses. A distinct numeric domain from design statuses.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{color_or_fallback, label_or_fallback, ColorToken, LifecycleStatus, UnknownStatusCode};

/// Status of an [`Order`](crate::order::Order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum OrderStatus {
    Pending,
    Paid,
    Completed,
    Processing,
    Shipping,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Completed,
        OrderStatus::Processing,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Completed => "completed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        }
    }
}

impl LifecycleStatus for OrderStatus {
    const ENTITY: &'static str = "order";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> i32 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Completed => 2,
            OrderStatus::Processing => 3,
            OrderStatus::Shipping => 4,
            OrderStatus::Delivered => 5,
            OrderStatus::Cancelled => 6,
            OrderStatus::Returned => 7,
        }
    }

    fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Chờ thanh toán",
            OrderStatus::Paid => "Đã thanh toán",
            OrderStatus::Completed => "Hoàn thành",
            OrderStatus::Processing => "Đang xử lý",
            OrderStatus::Shipping => "Đang giao",
            OrderStatus::Delivered => "Đã giao",
            OrderStatus::Cancelled => "Đã hủy",
            OrderStatus::Returned => "Đã trả hàng",
        }
    }

    fn color(self) -> ColorToken {
        match self {
            OrderStatus::Pending => ColorToken("#FF9800"),
            OrderStatus::Paid => ColorToken("#2196F3"),
            OrderStatus::Completed => ColorToken("#388E3C"),
            OrderStatus::Processing => ColorToken("#3F51B5"),
            OrderStatus::Shipping => ColorToken("#00BCD4"),
            OrderStatus::Delivered => ColorToken("#009688"),
            OrderStatus::Cancelled => ColorToken("#F44336"),
            OrderStatus::Returned => ColorToken("#795548"),
        }
    }

    fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Returned
        )
    }
}

impl TryFrom<i32> for OrderStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnknownStatusCode {
            entity: Self::ENTITY,
            code,
        })
    }
}

impl From<OrderStatus> for i32 {
    fn from(status: OrderStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label for a raw order status code, falling back for unknown codes.
pub fn order_status_label(code: i32) -> &'static str {
    label_or_fallback::<OrderStatus>(code)
}

/// Color for a raw order status code, falling back for unknown codes.
pub fn order_status_color(code: i32) -> ColorToken {
    color_or_fallback::<OrderStatus>(code)
}
