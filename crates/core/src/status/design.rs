//! Lifecycle states of a custom apparel design request.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{color_or_fallback, label_or_fallback, ColorToken, LifecycleStatus, UnknownStatusCode};

/// Status of a [`CustomDesign`](crate::design::CustomDesign).
///
/// Serialized as its integer code, matching the backend's numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum DesignStatus {
    Draft,
    Liked,
    Accepted,
    Request,
    Order,
    Shipping,
    Delivered,
    Done,
    Rejected,
}

impl DesignStatus {
    /// Status a freshly created design starts in.
    pub const INITIAL: DesignStatus = DesignStatus::Draft;

    pub const ALL: [DesignStatus; 9] = [
        DesignStatus::Draft,
        DesignStatus::Liked,
        DesignStatus::Accepted,
        DesignStatus::Request,
        DesignStatus::Order,
        DesignStatus::Shipping,
        DesignStatus::Delivered,
        DesignStatus::Done,
        DesignStatus::Rejected,
    ];

    /// Parse a status from its lowercase name (`"shipping"`) or numeric code (`"5"`).
    pub fn parse(input: &str) -> Option<DesignStatus> {
        let input = input.trim();
        if let Ok(code) = input.parse::<i32>() {
            return Self::from_code(code);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(input))
    }

    /// Stable lowercase name used in logs and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            DesignStatus::Draft => "draft",
            DesignStatus::Liked => "liked",
            DesignStatus::Accepted => "accepted",
            DesignStatus::Request => "request",
            DesignStatus::Order => "order",
            DesignStatus::Shipping => "shipping",
            DesignStatus::Delivered => "delivered",
            DesignStatus::Done => "done",
            DesignStatus::Rejected => "rejected",
        }
    }
}

impl LifecycleStatus for DesignStatus {
    const ENTITY: &'static str = "custom design";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn code(self) -> i32 {
        match self {
            DesignStatus::Draft => 0,
            DesignStatus::Liked => 1,
            DesignStatus::Accepted => 2,
            DesignStatus::Request => 3,
            DesignStatus::Order => 4,
            DesignStatus::Shipping => 5,
            DesignStatus::Delivered => 6,
            DesignStatus::Done => 7,
            DesignStatus::Rejected => 8,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DesignStatus::Draft => "Bản nháp",
            DesignStatus::Liked => "Đã thích",
            DesignStatus::Accepted => "Đã duyệt",
            DesignStatus::Request => "Đang yêu cầu",
            DesignStatus::Order => "Đã đặt hàng",
            DesignStatus::Shipping => "Đang giao",
            DesignStatus::Delivered => "Đã giao",
            DesignStatus::Done => "Hoàn thành",
            DesignStatus::Rejected => "Đã từ chối",
        }
    }

    fn color(self) -> ColorToken {
        match self {
            DesignStatus::Draft => ColorToken("#607D8B"),
            DesignStatus::Liked => ColorToken("#E91E63"),
            DesignStatus::Accepted => ColorToken("#4CAF50"),
            DesignStatus::Request => ColorToken("#FF9800"),
            DesignStatus::Order => ColorToken("#2196F3"),
            DesignStatus::Shipping => ColorToken("#00BCD4"),
            DesignStatus::Delivered => ColorToken("#009688"),
            DesignStatus::Done => ColorToken("#388E3C"),
            DesignStatus::Rejected => ColorToken("#F44336"),
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, DesignStatus::Done | DesignStatus::Rejected)
    }
}

impl TryFrom<i32> for DesignStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnknownStatusCode {
            entity: Self::ENTITY,
            code,
        })
    }
}

impl From<DesignStatus> for i32 {
    fn from(status: DesignStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for DesignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label for a raw design status code, falling back for unknown codes.
pub fn design_status_label(code: i32) -> &'static str {
    label_or_fallback::<DesignStatus>(code)
}

/// Color for a raw design status code, falling back for unknown codes.
pub fn design_status_color(code: i32) -> ColorToken {
    color_or_fallback::<DesignStatus>(code)
}
