//! Status registries for custom designs and orders.
//!
//! Each status enum is closed and maps to exactly one display label and one
//! color token. The raw-code lookups (`*_label`, `*_color`) are total: codes
//! the registry does not know resolve to [`FALLBACK_LABEL`] and
//! [`FALLBACK_COLOR`].

pub mod design;
pub mod order;

use std::fmt;

use serde::Serialize;

pub use design::{design_status_color, design_status_label, DesignStatus};
pub use order::{order_status_color, order_status_label, OrderStatus};

/// Label shown for any status code missing from the registry.
pub const FALLBACK_LABEL: &str = "Không xác định";

/// Neutral gray used for any status code missing from the registry.
pub const FALLBACK_COLOR: ColorToken = ColorToken("#9E9E9E");

/// A display color in `#RRGGBB` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColorToken(pub &'static str);

impl ColorToken {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Behaviour shared by the closed status enums.
///
/// The list presenter and the transition gates are generic over this trait so
/// the same filtering and whitelist logic serves both designs and orders.
pub trait LifecycleStatus: Copy + Eq + fmt::Debug + 'static {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// Every member, in code order.
    fn all() -> &'static [Self];

    /// Wire code for this status.
    fn code(self) -> i32;

    /// Human-readable label.
    fn label(self) -> &'static str;

    /// Display color.
    fn color(self) -> ColorToken;

    /// Whether no further transitions exist from this status.
    fn is_terminal(self) -> bool;

    /// Resolve a wire code, `None` for codes outside the enumeration.
    fn from_code(code: i32) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.code() == code)
    }
}

/// Error returned when a wire code does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {entity} status code {code}")]
pub struct UnknownStatusCode {
    pub entity: &'static str,
    pub code: i32,
}

fn label_or_fallback<S: LifecycleStatus>(code: i32) -> &'static str {
    S::from_code(code).map_or(FALLBACK_LABEL, S::label)
}

fn color_or_fallback<S: LifecycleStatus>(code: i32) -> ColorToken {
    S::from_code(code).map_or(FALLBACK_COLOR, S::color)
}
