//! Filtering and row view models for the design and order history lists.
//!
//! Both lists follow the same strategy: the full collection is fetched once,
//! tabs and search filter it in memory, and the collection is replaced
//! wholesale after every successful mutation.

use serde::Serialize;

use crate::design::CustomDesign;
use crate::order::Order;
use crate::status::{ColorToken, DesignStatus, LifecycleStatus, OrderStatus};
use crate::transition::{design_transitions, order_transitions, TransitionRule};
use crate::types::{DbId, Money};

/// Wire sentinel for the "all" tab.
pub const ALL_STATUS_CODE: i32 = -1;

/* --------------------------------------------------------------------------
Filters
-------------------------------------------------------------------------- */

/// Tab filter over a status domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S: LifecycleStatus> StatusFilter<S> {
    /// Resolve a tab code; `-1` selects everything, unknown codes give `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        if code == ALL_STATUS_CODE {
            return Some(StatusFilter::All);
        }
        S::from_code(code).map(StatusFilter::Only)
    }

    pub fn code(&self) -> i32 {
        match self {
            StatusFilter::All => ALL_STATUS_CODE,
            StatusFilter::Only(status) => status.code(),
        }
    }

    pub fn matches(&self, status: S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// An item that can appear in a status-tabbed list.
pub trait Listable {
    type Status: LifecycleStatus;

    fn id(&self) -> DbId;

    fn status(&self) -> Self::Status;

    /// Text the search box matches against.
    fn display_name(&self) -> &str;
}

impl Listable for CustomDesign {
    type Status = DesignStatus;

    fn id(&self) -> DbId {
        self.id
    }

    fn status(&self) -> DesignStatus {
        self.status
    }

    fn display_name(&self) -> &str {
        &self.design_name
    }
}

impl Listable for Order {
    type Status = OrderStatus;

    fn id(&self) -> DbId {
        self.id
    }

    fn status(&self) -> OrderStatus {
        self.status
    }

    fn display_name(&self) -> &str {
        &self.order_number
    }
}

/// Apply the tab filter AND the search term, keeping the original order.
///
/// The search is a case-insensitive substring match on the display name,
/// whitespace included. Only the empty term matches everything.
pub fn present<'a, T: Listable>(
    items: &'a [T],
    filter: &StatusFilter<T::Status>,
    search: &str,
) -> Vec<&'a T> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| filter.matches(item.status()))
        .filter(|item| needle.is_empty() || item.display_name().to_lowercase().contains(&needle))
        .collect()
}

/* --------------------------------------------------------------------------
Tabs
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTab<S> {
    pub key: &'static str,
    pub label: &'static str,
    pub filter: StatusFilter<S>,
}

const fn tab<S>(key: &'static str, label: &'static str, filter: StatusFilter<S>) -> StatusTab<S> {
    StatusTab { key, label, filter }
}

/// Tab every design list opens on.
pub const ALL_DESIGNS_TAB: StatusTab<DesignStatus> = tab("all", "Tất cả", StatusFilter::All);

pub const DESIGN_TABS: &[StatusTab<DesignStatus>] = &[
    ALL_DESIGNS_TAB,
    tab("draft", "Bản nháp", StatusFilter::Only(DesignStatus::Draft)),
    tab("liked", "Đã thích", StatusFilter::Only(DesignStatus::Liked)),
    tab("request", "Đang yêu cầu", StatusFilter::Only(DesignStatus::Request)),
    tab("accepted", "Đã duyệt", StatusFilter::Only(DesignStatus::Accepted)),
    tab("order", "Đã đặt hàng", StatusFilter::Only(DesignStatus::Order)),
    tab("shipping", "Đang giao", StatusFilter::Only(DesignStatus::Shipping)),
    tab("delivered", "Đã giao", StatusFilter::Only(DesignStatus::Delivered)),
    tab("done", "Hoàn thành", StatusFilter::Only(DesignStatus::Done)),
    tab("rejected", "Đã từ chối", StatusFilter::Only(DesignStatus::Rejected)),
];

/// Tab every order list opens on.
pub const ALL_ORDERS_TAB: StatusTab<OrderStatus> = tab("all", "Tất cả", StatusFilter::All);

pub const ORDER_TABS: &[StatusTab<OrderStatus>] = &[
    ALL_ORDERS_TAB,
    tab("pending", "Chờ thanh toán", StatusFilter::Only(OrderStatus::Pending)),
    tab("paid", "Đã thanh toán", StatusFilter::Only(OrderStatus::Paid)),
    tab("processing", "Đang xử lý", StatusFilter::Only(OrderStatus::Processing)),
    tab("shipping", "Đang giao", StatusFilter::Only(OrderStatus::Shipping)),
    tab("delivered", "Đã giao", StatusFilter::Only(OrderStatus::Delivered)),
    tab("completed", "Hoàn thành", StatusFilter::Only(OrderStatus::Completed)),
    tab("cancelled", "Đã hủy", StatusFilter::Only(OrderStatus::Cancelled)),
    tab("returned", "Đã trả hàng", StatusFilter::Only(OrderStatus::Returned)),
];

pub fn find_tab<S>(tabs: &'static [StatusTab<S>], key: &str) -> Option<&'static StatusTab<S>> {
    tabs.iter().find(|t| t.key.eq_ignore_ascii_case(key.trim()))
}

/* --------------------------------------------------------------------------
Row view models
-------------------------------------------------------------------------- */

/// A control rendered on a list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowControl {
    pub target_code: i32,
    pub label: &'static str,
    pub needs_confirmation: bool,
}

impl<S: LifecycleStatus> From<&TransitionRule<S>> for RowControl {
    fn from(rule: &TransitionRule<S>) -> Self {
        Self {
            target_code: rule.target.code(),
            label: rule.action_label,
            needs_confirmation: rule.requires_confirmation(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRow {
    pub id: DbId,
    pub name: String,
    pub status_label: &'static str,
    pub status_color: ColorToken,
    pub image_url: Option<String>,
    pub total_price: Money,
    pub controls: Vec<RowControl>,
}

impl DesignRow {
    pub fn from_design(design: &CustomDesign) -> Self {
        Self {
            id: design.id,
            name: design.design_name.clone(),
            status_label: design.status.label(),
            status_color: design.status.color(),
            image_url: design.design_image_url.clone(),
            total_price: design.total_price,
            controls: design_transitions(design.status)
                .iter()
                .map(RowControl::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: DbId,
    pub order_number: String,
    pub status_label: &'static str,
    pub status_color: ColorToken,
    pub item_count: i32,
    pub final_total: Money,
    pub controls: Vec<RowControl>,
}

impl OrderRow {
    pub fn from_order(order: &Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number.clone(),
            status_label: order.status.label(),
            status_color: order.status.color(),
            item_count: order.item_count(),
            final_total: order.final_total,
            controls: order_transitions(order.status)
                .iter()
                .map(RowControl::from)
                .collect(),
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
