//! Order history controller.
//!
//! Same strategy as the design list: fetch the full collection once, filter
//! tabs in memory, re-fetch after every successful mutation.

use std::sync::Arc;

use threadline_client::StorefrontBackend;
use threadline_core::error::CoreError;
use threadline_core::order::Order;
use threadline_core::presenter::{OrderRow, StatusTab, ALL_ORDERS_TAB, ORDER_TABS};
use threadline_core::status::OrderStatus;
use threadline_core::transition::{find_order_transition, validate_cancel_reason, TransitionRule};
use threadline_core::types::DbId;

use crate::error::LifecycleError;
use crate::lifecycle::TransitionOutcome;
use crate::notify::{Confirmer, Notifier, STATUS_UPDATED_MESSAGE};
use crate::screen::{report_failure, InFlightGuard, ListScreen};

pub struct OrderHistory<B> {
    backend: Arc<B>,
    screen: ListScreen<Order>,
}

impl<B: StorefrontBackend> OrderHistory<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            screen: ListScreen::new(ORDER_TABS, &ALL_ORDERS_TAB),
        }
    }

    pub async fn refresh(&self) -> Result<usize, LifecycleError> {
        let orders = self.backend.fetch_orders().await?;
        let count = orders.len();
        self.screen.replace(orders).await;
        tracing::debug!(count, "Order list refreshed");
        Ok(count)
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.screen.all().await
    }

    pub async fn visible(&self) -> Vec<Order> {
        self.screen.visible().await
    }

    pub async fn rows(&self) -> Vec<OrderRow> {
        self.visible().await.iter().map(OrderRow::from_order).collect()
    }

    pub async fn select_tab(
        &self,
        key: &str,
    ) -> Result<&'static StatusTab<OrderStatus>, LifecycleError> {
        Ok(self.screen.select_tab(key).await?)
    }

    pub async fn set_search(&self, term: &str) {
        self.screen.set_search(term).await;
    }

    pub fn is_busy(&self, order_id: DbId) -> bool {
        self.screen.is_busy(order_id)
    }

    /// Cancel an order with a reason. Requires confirmation.
    pub async fn cancel_order(
        &self,
        order_id: DbId,
        reason: &str,
        confirmer: &dyn Confirmer,
        notifier: &dyn Notifier,
    ) -> Result<TransitionOutcome, LifecycleError> {
        if let Err(e) = validate_cancel_reason(reason) {
            return Err(report_failure(notifier, e.into()));
        }
        let reason = reason.trim();

        let (rule, _guard) = self
            .prepare(order_id, OrderStatus::Cancelled, notifier)
            .await?;

        if let Some(prompt) = rule.confirmation {
            if !confirmer.confirm(prompt).await {
                tracing::info!(order_id, "Order cancellation declined");
                return Ok(TransitionOutcome::Declined);
            }
        }

        let result = self
            .backend
            .set_order_status(order_id, OrderStatus::Cancelled, Some(reason))
            .await;
        if let Err(e) = result {
            return Err(report_failure(notifier, e.into()));
        }
        tracing::info!(order_id, reason, "Order cancelled");

        Ok(self.finish(order_id, notifier).await)
    }

    /// Confirm receipt of a shipped order.
    pub async fn confirm_delivered(
        &self,
        order_id: DbId,
        notifier: &dyn Notifier,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let (_rule, _guard) = self
            .prepare(order_id, OrderStatus::Delivered, notifier)
            .await?;

        if let Err(e) = self.backend.confirm_order_delivered(order_id).await {
            return Err(report_failure(notifier, e.into()));
        }
        tracing::info!(order_id, "Order delivery confirmed");

        Ok(self.finish(order_id, notifier).await)
    }

    /// Resolve the whitelisted rule for `order_id -> target` and claim the order.
    async fn prepare(
        &self,
        order_id: DbId,
        target: OrderStatus,
        notifier: &dyn Notifier,
    ) -> Result<(&'static TransitionRule<OrderStatus>, InFlightGuard), LifecycleError> {
        let current = match self.screen.find(order_id).await {
            Some(order) => order.status,
            None => {
                let err = CoreError::NotFound {
                    entity: "order",
                    id: order_id,
                };
                return Err(report_failure(notifier, err.into()));
            }
        };

        let rule = match find_order_transition(current, target) {
            Ok(rule) => rule,
            Err(e) => return Err(report_failure(notifier, e.into())),
        };

        let guard = self.screen.claim(order_id)?;
        Ok((rule, guard))
    }

    /// Report an accepted mutation, then re-fetch.
    async fn finish(&self, order_id: DbId, notifier: &dyn Notifier) -> TransitionOutcome {
        notifier.success(STATUS_UPDATED_MESSAGE);
        match self.refresh().await {
            Ok(_) => TransitionOutcome::Applied,
            Err(e) => {
                tracing::warn!(order_id, error = %e, "Re-fetch after order update failed");
                TransitionOutcome::AppliedStale
            }
        }
    }
}
