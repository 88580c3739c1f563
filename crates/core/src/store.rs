//! Explicit application state for the storefront session.
//!
//! Holds the signed-in session, the cart, and the applied coupon. State is
//! changed only through [`AppStore::dispatch`]; consumers read it through the
//! typed selectors and receive only the slice they ask for.

use serde::{Deserialize, Serialize};

use crate::coupon::{CheckoutTotals, Coupon};
use crate::error::CoreError;
use crate::types::{DbId, Money, Timestamp};

/// Maximum quantity of a single cart line.
pub const MAX_LINE_QUANTITY: i32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: DbId,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: DbId,
    pub variant_id: Option<DbId>,
    pub name: String,
    pub color: Option<String>,
    pub size: Option<String>,
    pub unit_price: Money,
    pub quantity: i32,
}

impl CartLine {
    fn key(&self) -> (DbId, Option<DbId>) {
        (self.product_id, self.variant_id)
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(Money::from(self.quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

/// Every state change the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    SignIn(Session),
    SignOut,
    AddToCart(CartLine),
    SetQuantity {
        product_id: DbId,
        variant_id: Option<DbId>,
        quantity: i32,
    },
    RemoveFromCart {
        product_id: DbId,
        variant_id: Option<DbId>,
    },
    ClearCart,
    ApplyCoupon(Coupon),
    RemoveCoupon,
}

#[derive(Debug, Clone, Default)]
pub struct AppStore {
    session: Option<Session>,
    cart: Cart,
    coupon: Option<Coupon>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: AppAction) -> Result<(), CoreError> {
        match action {
            AppAction::SignIn(session) => {
                if session.token.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "Session token must not be empty".to_string(),
                    ));
                }
                self.session = Some(session);
            }
            AppAction::SignOut => {
                self.session = None;
                self.cart = Cart::default();
                self.coupon = None;
            }
            AppAction::AddToCart(line) => self.add_line(line)?,
            AppAction::SetQuantity {
                product_id,
                variant_id,
                quantity,
            } => self.set_quantity((product_id, variant_id), quantity)?,
            AppAction::RemoveFromCart {
                product_id,
                variant_id,
            } => self.cart.lines.retain(|l| l.key() != (product_id, variant_id)),
            AppAction::ClearCart => {
                self.cart = Cart::default();
                self.coupon = None;
            }
            AppAction::ApplyCoupon(coupon) => self.coupon = Some(coupon),
            AppAction::RemoveCoupon => self.coupon = None,
        }
        Ok(())
    }

    fn add_line(&mut self, line: CartLine) -> Result<(), CoreError> {
        validate_quantity(line.quantity)?;
        if line.unit_price < 0 {
            return Err(CoreError::Validation(
                "Unit price must not be negative".to_string(),
            ));
        }

        match self.cart.lines.iter_mut().find(|l| l.key() == line.key()) {
            Some(existing) => {
                let merged = existing.quantity + line.quantity;
                validate_quantity(merged)?;
                existing.quantity = merged;
            }
            None => self.cart.lines.push(line),
        }
        Ok(())
    }

    fn set_quantity(&mut self, key: (DbId, Option<DbId>), quantity: i32) -> Result<(), CoreError> {
        if quantity == 0 {
            self.cart.lines.retain(|l| l.key() != key);
            return Ok(());
        }
        validate_quantity(quantity)?;
        let line = self
            .cart
            .lines
            .iter_mut()
            .find(|l| l.key() == key)
            .ok_or(CoreError::NotFound {
                entity: "cart line",
                id: key.0,
            })?;
        line.quantity = quantity;
        Ok(())
    }

    /* ---- selectors ---- */

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user_id(&self) -> Option<DbId> {
        self.session.as_ref().map(|s| s.user_id)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Total number of units in the cart.
    pub fn cart_count(&self) -> i32 {
        self.cart.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn cart_subtotal(&self) -> Money {
        self.cart
            .lines
            .iter()
            .map(CartLine::line_total)
            .fold(0, Money::saturating_add)
    }

    /// Checkout breakdown with the applied coupon, if any.
    ///
    /// Fails when the applied coupon no longer qualifies for the cart.
    pub fn checkout_totals(
        &self,
        shipping_fee: Money,
        now: Timestamp,
    ) -> Result<CheckoutTotals, CoreError> {
        let subtotal = self.cart_subtotal();
        let discount = match &self.coupon {
            Some(coupon) => coupon.discount_for(subtotal, now)?,
            None => 0,
        };
        Ok(CheckoutTotals::compute(subtotal, shipping_fee, discount))
    }
}

fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(CoreError::Validation(format!(
            "Quantity must be between 1 and {MAX_LINE_QUANTITY} (got {quantity})"
        )));
    }
    Ok(())
}
