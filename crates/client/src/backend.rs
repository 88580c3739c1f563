use async_trait::async_trait;

use threadline_core::design::{CreateDesignRequest, CustomDesign};
use threadline_core::order::Order;
use threadline_core::status::{DesignStatus, OrderStatus};
use threadline_core::types::DbId;

use crate::error::ApiError;

/// Remote operations the storefront core consumes.
///
/// The backend is the single source of truth. Implementations make exactly
/// one attempt per call and report success or failure; callers decide what
/// to refresh.
#[async_trait]
pub trait StorefrontBackend: Send + Sync {
    /// List the user's designs, optionally restricted to one status.
    async fn fetch_designs(
        &self,
        status: Option<DesignStatus>,
    ) -> Result<Vec<CustomDesign>, ApiError>;

    /// The most recently created design, if the user has any.
    async fn fetch_newest_design(&self) -> Result<Option<CustomDesign>, ApiError>;

    async fn create_design(&self, form: &CreateDesignRequest) -> Result<CustomDesign, ApiError>;

    async fn set_design_status(
        &self,
        design_id: DbId,
        status: DesignStatus,
    ) -> Result<(), ApiError>;

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Change an order's status. Cancellations carry a reason.
    async fn set_order_status(
        &self,
        order_id: DbId,
        status: OrderStatus,
        reason: Option<&str>,
    ) -> Result<(), ApiError>;

    async fn confirm_order_delivered(&self, order_id: DbId) -> Result<(), ApiError>;
}
