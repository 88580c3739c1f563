//! Transition gates for designs and orders.
//!
//! The whitelist of user-triggerable status changes lives in one table per
//! entity. The presenter reads it to decide which row controls to render and
//! the lifecycle controllers read it to validate a requested change, so a
//! pair that has no rule here is unreachable from the client.
//!
//! Design transitions:
//! - `request`  -> `draft`     (cancel request, no confirmation)
//! - `accepted` -> `order`     (place order, no confirmation)
//! - `accepted` -> `rejected`  (confirmation required)
//! - `accepted` -> `draft`     (revert, confirmation required)
//! - `shipping` -> `delivered` (confirm delivered, no confirmation)
//!
//! Order transitions:
//! - `pending`, `paid` -> `cancelled` (confirmation and reason required)
//! - `shipping` -> `delivered`        (confirm received, no confirmation)

use crate::error::CoreError;
use crate::status::{DesignStatus, LifecycleStatus, OrderStatus};

/* --------------------------------------------------------------------------
Rule type
-------------------------------------------------------------------------- */

/// One whitelisted status change from a given current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule<S> {
    /// Status the entity moves to.
    pub target: S,
    /// Label of the control that triggers this change.
    pub action_label: &'static str,
    /// Prompt the user must accept before the request is sent.
    pub confirmation: Option<&'static str>,
    /// Whether the backend expects a free-text reason with the change.
    pub requires_reason: bool,
}

impl<S> TransitionRule<S> {
    pub fn requires_confirmation(&self) -> bool {
        self.confirmation.is_some()
    }
}

/* --------------------------------------------------------------------------
Prompts
-------------------------------------------------------------------------- */

pub const REJECT_DESIGN_PROMPT: &str = "Are you sure you want to reject this design?";
pub const REVERT_TO_DRAFT_PROMPT: &str = "Revert to draft?";
pub const CANCEL_ORDER_PROMPT: &str = "Are you sure you want to cancel this order?";

/// Maximum length of an order cancellation reason.
pub const MAX_CANCEL_REASON_LENGTH: usize = 500;

/* --------------------------------------------------------------------------
Design gate
-------------------------------------------------------------------------- */

const fn quick<S>(target: S, action_label: &'static str) -> TransitionRule<S> {
    TransitionRule {
        target,
        action_label,
        confirmation: None,
        requires_reason: false,
    }
}

const fn confirmed<S>(
    target: S,
    action_label: &'static str,
    prompt: &'static str,
) -> TransitionRule<S> {
    TransitionRule {
        target,
        action_label,
        confirmation: Some(prompt),
        requires_reason: false,
    }
}

const FROM_REQUEST: &[TransitionRule<DesignStatus>] =
    &[quick(DesignStatus::Draft, "Hủy yêu cầu")];

const FROM_ACCEPTED: &[TransitionRule<DesignStatus>] = &[
    quick(DesignStatus::Order, "Đặt hàng"),
    confirmed(DesignStatus::Rejected, "Từ chối", REJECT_DESIGN_PROMPT),
    confirmed(DesignStatus::Draft, "Về bản nháp", REVERT_TO_DRAFT_PROMPT),
];

const FROM_SHIPPING: &[TransitionRule<DesignStatus>] =
    &[quick(DesignStatus::Delivered, "Đã nhận hàng")];

/// Returns the whitelisted transitions out of `current`.
pub fn design_transitions(current: DesignStatus) -> &'static [TransitionRule<DesignStatus>] {
    match current {
        DesignStatus::Request => FROM_REQUEST,
        DesignStatus::Accepted => FROM_ACCEPTED,
        DesignStatus::Shipping => FROM_SHIPPING,
        DesignStatus::Draft
        | DesignStatus::Liked
        | DesignStatus::Order
        | DesignStatus::Delivered
        | DesignStatus::Done
        | DesignStatus::Rejected => &[],
    }
}

/// Look up the rule for `current -> target`, rejecting pairs outside the whitelist.
pub fn find_design_transition(
    current: DesignStatus,
    target: DesignStatus,
) -> Result<&'static TransitionRule<DesignStatus>, CoreError> {
    find_rule(design_transitions(current), current, target)
}

/* --------------------------------------------------------------------------
Order gate
-------------------------------------------------------------------------- */

const CANCEL_ORDER: TransitionRule<OrderStatus> = TransitionRule {
    target: OrderStatus::Cancelled,
    action_label: "Hủy đơn",
    confirmation: Some(CANCEL_ORDER_PROMPT),
    requires_reason: true,
};

const FROM_PENDING_OR_PAID: &[TransitionRule<OrderStatus>] = &[CANCEL_ORDER];

const FROM_ORDER_SHIPPING: &[TransitionRule<OrderStatus>] =
    &[quick(OrderStatus::Delivered, "Đã nhận hàng")];

/// Returns the whitelisted transitions out of `current`.
pub fn order_transitions(current: OrderStatus) -> &'static [TransitionRule<OrderStatus>] {
    match current {
        OrderStatus::Pending | OrderStatus::Paid => FROM_PENDING_OR_PAID,
        OrderStatus::Shipping => FROM_ORDER_SHIPPING,
        OrderStatus::Completed
        | OrderStatus::Processing
        | OrderStatus::Delivered
        | OrderStatus::Cancelled
        | OrderStatus::Returned => &[],
    }
}

/// Look up the rule for `current -> target`, rejecting pairs outside the whitelist.
pub fn find_order_transition(
    current: OrderStatus,
    target: OrderStatus,
) -> Result<&'static TransitionRule<OrderStatus>, CoreError> {
    find_rule(order_transitions(current), current, target)
}

/// Validate the free-text reason attached to an order cancellation.
pub fn validate_cancel_reason(reason: &str) -> Result<(), CoreError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "A cancellation reason is required".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_CANCEL_REASON_LENGTH {
        return Err(CoreError::Validation(format!(
            "Cancellation reason exceeds maximum length of {MAX_CANCEL_REASON_LENGTH} characters"
        )));
    }
    Ok(())
}

fn find_rule<S: LifecycleStatus>(
    rules: &'static [TransitionRule<S>],
    current: S,
    target: S,
) -> Result<&'static TransitionRule<S>, CoreError> {
    rules
        .iter()
        .find(|rule| rule.target == target)
        .ok_or_else(|| CoreError::InvalidTransition {
            entity: S::ENTITY,
            from: format!("{current:?}"),
            to: format!("{target:?}"),
        })
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
