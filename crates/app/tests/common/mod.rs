//! Shared test doubles for the controller integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;

use threadline_app::{Confirmer, Notifier};
use threadline_client::{ApiError, StorefrontBackend};
use threadline_core::design::{CreateDesignRequest, CustomDesign};
use threadline_core::order::Order;
use threadline_core::status::{DesignStatus, OrderStatus};
use threadline_core::types::DbId;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn design(id: DbId, name: &str, status: DesignStatus) -> CustomDesign {
    CustomDesign {
        id,
        design_name: name.to_string(),
        prompt_text: "retro sunset".to_string(),
        shirt_type: "T-shirt".to_string(),
        base_color: "white".to_string(),
        size: "L".to_string(),
        special_requirements: None,
        quantity: 1,
        design_image_url: None,
        total_price: 250_000,
        status,
        created_at: Utc::now(),
    }
}

pub fn order(id: DbId, number: &str, status: OrderStatus) -> Order {
    Order {
        id,
        order_number: number.to_string(),
        status,
        order_items: Vec::new(),
        receiver_name: "Nguyen Van A".to_string(),
        receiver_phone: "0900000000".to_string(),
        shipping_address: "1 Le Loi, Q1".to_string(),
        note: None,
        subtotal_amount: 300_000,
        shipping_fee: 30_000,
        discount_amount: 0,
        final_total: 330_000,
        coupon_code: None,
        cancel_reason: None,
        created_at: Utc::now(),
    }
}

pub fn design_form(name: &str) -> CreateDesignRequest {
    CreateDesignRequest {
        design_name: name.to_string(),
        prompt_text: "a cat surfing".to_string(),
        shirt_type: "T-shirt".to_string(),
        base_color: "black".to_string(),
        size: "M".to_string(),
        special_requirements: None,
        quantity: 1,
    }
}

// ---------------------------------------------------------------------------
// Mock backend
// ---------------------------------------------------------------------------

/// In-memory backend recording every call.
///
/// Mutations are accepted but, unless `apply_mutations` is set, do not change
/// what later fetches return. That makes it visible whether a controller
/// patched its cache locally instead of re-fetching.
#[derive(Default)]
pub struct MockBackend {
    pub designs: Mutex<Vec<CustomDesign>>,
    pub orders: Mutex<Vec<Order>>,
    pub fail_mutations: AtomicBool,
    pub fail_fetches: AtomicBool,
    pub apply_mutations: AtomicBool,
    /// When set, design status mutations wait for `release` before answering.
    pub hold_mutations: AtomicBool,
    pub release: Notify,
    pub fetch_designs_calls: AtomicUsize,
    pub fetch_orders_calls: AtomicUsize,
    pub design_status_calls: Mutex<Vec<(DbId, DesignStatus)>>,
    pub order_status_calls: Mutex<Vec<(DbId, OrderStatus, Option<String>)>>,
    pub delivered_calls: Mutex<Vec<DbId>>,
    pub created: Mutex<Vec<CreateDesignRequest>>,
}

impl MockBackend {
    pub fn with_designs(designs: Vec<CustomDesign>) -> Self {
        Self {
            designs: Mutex::new(designs),
            ..Default::default()
        }
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
            ..Default::default()
        }
    }

    pub fn design_fetches(&self) -> usize {
        self.fetch_designs_calls.load(Ordering::SeqCst)
    }

    pub fn order_fetches(&self) -> usize {
        self.fetch_orders_calls.load(Ordering::SeqCst)
    }

    pub fn design_mutations(&self) -> Vec<(DbId, DesignStatus)> {
        self.design_status_calls.lock().unwrap().clone()
    }

    pub fn order_mutations(&self) -> Vec<(DbId, OrderStatus, Option<String>)> {
        self.order_status_calls.lock().unwrap().clone()
    }

    fn rejection() -> ApiError {
        ApiError::Rejected {
            status: 409,
            body: "status changed concurrently".to_string(),
        }
    }
}

#[async_trait]
impl StorefrontBackend for MockBackend {
    async fn fetch_designs(
        &self,
        status: Option<DesignStatus>,
    ) -> Result<Vec<CustomDesign>, ApiError> {
        self.fetch_designs_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(Self::rejection());
        }
        let designs = self.designs.lock().unwrap().clone();
        Ok(designs
            .into_iter()
            .filter(|d| status.map_or(true, |s| d.status == s))
            .collect())
    }

    async fn fetch_newest_design(&self) -> Result<Option<CustomDesign>, ApiError> {
        Ok(self
            .designs
            .lock()
            .unwrap()
            .iter()
            .max_by_key(|d| d.id)
            .cloned())
    }

    async fn create_design(&self, form: &CreateDesignRequest) -> Result<CustomDesign, ApiError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection());
        }
        self.created.lock().unwrap().push(form.clone());
        let mut designs = self.designs.lock().unwrap();
        let id = designs.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        let created = design(id, &form.design_name, DesignStatus::Draft);
        designs.push(created.clone());
        Ok(created)
    }

    async fn set_design_status(
        &self,
        design_id: DbId,
        status: DesignStatus,
    ) -> Result<(), ApiError> {
        self.design_status_calls.lock().unwrap().push((design_id, status));
        if self.hold_mutations.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection());
        }
        if self.apply_mutations.load(Ordering::SeqCst) {
            let mut designs = self.designs.lock().unwrap();
            if let Some(d) = designs.iter_mut().find(|d| d.id == design_id) {
                d.status = status;
            }
        }
        Ok(())
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.fetch_orders_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(Self::rejection());
        }
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn set_order_status(
        &self,
        order_id: DbId,
        status: OrderStatus,
        reason: Option<&str>,
    ) -> Result<(), ApiError> {
        self.order_status_calls
            .lock()
            .unwrap()
            .push((order_id, status, reason.map(str::to_string)));
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection());
        }
        if self.apply_mutations.load(Ordering::SeqCst) {
            let mut orders = self.orders.lock().unwrap();
            if let Some(o) = orders.iter_mut().find(|o| o.id == order_id) {
                o.status = status;
                o.cancel_reason = reason.map(str::to_string);
            }
        }
        Ok(())
    }

    async fn confirm_order_delivered(&self, order_id: DbId) -> Result<(), ApiError> {
        self.delivered_calls.lock().unwrap().push(order_id);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::rejection());
        }
        if self.apply_mutations.load(Ordering::SeqCst) {
            let mut orders = self.orders.lock().unwrap();
            if let Some(o) = orders.iter_mut().find(|o| o.id == order_id) {
                o.status = OrderStatus::Delivered;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notifier / confirmer doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
    pub errors: Mutex<Vec<String>>,
    pub successes: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    pub fn success_count(&self) -> usize {
        self.successes.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }
}

/// Answers every prompt with `answer` and records the prompts it saw.
pub struct ScriptedConfirmer {
    pub answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}
