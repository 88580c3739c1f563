//! The explicit store the CLI builds at startup and passes to its commands.

use threadline_core::coupon::{CheckoutTotals, Coupon};
use threadline_core::error::CoreError;
use threadline_core::store::{AppAction, AppStore, CartLine, Session};
use threadline_core::types::{Money, Timestamp};

use crate::config::AppConfig;

/// Build the store, signed in when both a user id and an API token are configured.
pub fn store_from_config(config: &AppConfig) -> Result<AppStore, CoreError> {
    let mut store = AppStore::new();
    if let (Some(user_id), Some(token)) = (config.user_id, config.client.api_token.as_ref()) {
        store.dispatch(AppAction::SignIn(Session {
            user_id,
            token: token.clone(),
        }))?;
        tracing::debug!(user_id, "Session restored from configuration");
    }
    Ok(store)
}

/// Replace the cart with `lines`, apply `coupon`, and return the checkout breakdown.
pub fn checkout(
    store: &mut AppStore,
    lines: Vec<CartLine>,
    coupon: Option<Coupon>,
    shipping_fee: Money,
    now: Timestamp,
) -> Result<CheckoutTotals, CoreError> {
    if shipping_fee < 0 {
        return Err(CoreError::Validation(
            "Shipping fee must not be negative".to_string(),
        ));
    }

    store.dispatch(AppAction::ClearCart)?;
    for line in lines {
        store.dispatch(AppAction::AddToCart(line))?;
    }
    if let Some(coupon) = coupon {
        store.dispatch(AppAction::ApplyCoupon(coupon))?;
    }
    store.checkout_totals(shipping_fee, now)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};
    use threadline_client::ClientConfig;
    use threadline_core::coupon::DiscountKind;

    use super::*;

    fn config(user_id: Option<i64>, token: Option<&str>) -> AppConfig {
        AppConfig {
            client: ClientConfig::new(
                "http://localhost:3000/api/v1",
                token.map(str::to_string),
                10,
            ),
            bookkeeping_dir: PathBuf::from(".threadline"),
            user_id,
        }
    }

    fn line(product_id: i64, unit_price: Money, quantity: i32) -> CartLine {
        CartLine {
            product_id,
            variant_id: None,
            name: format!("Product {product_id}"),
            color: None,
            size: Some("M".to_string()),
            unit_price,
            quantity,
        }
    }

    #[test]
    fn store_is_signed_in_with_user_and_token() {
        let store = store_from_config(&config(Some(7), Some("tok"))).unwrap();
        assert_eq!(store.user_id(), Some(7));
        assert_eq!(store.session().map(|s| s.token.as_str()), Some("tok"));
    }

    #[test]
    fn store_without_token_is_signed_out() {
        let store = store_from_config(&config(Some(7), None)).unwrap();
        assert_eq!(store.user_id(), None);
        let store = store_from_config(&config(None, Some("tok"))).unwrap();
        assert!(store.session().is_none());
    }

    #[test]
    fn checkout_merges_lines_and_applies_coupon() {
        let mut store = AppStore::new();
        let coupon = Coupon {
            code: "SALE10".to_string(),
            kind: DiscountKind::Percent,
            value: 10,
            min_order_amount: 100_000,
            max_discount: Some(50_000),
            expires_at: None,
        };

        let totals = checkout(
            &mut store,
            vec![line(1, 150_000, 1), line(1, 150_000, 1), line(2, 100_000, 1)],
            Some(coupon),
            30_000,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(store.cart_count(), 3);
        assert_eq!(totals.subtotal_amount, 400_000);
        assert_eq!(totals.discount_amount, 40_000);
        assert_eq!(totals.final_total, 390_000);
    }

    #[test]
    fn expired_coupon_fails_checkout() {
        let mut store = AppStore::new();
        let coupon = Coupon {
            code: "OLD".to_string(),
            kind: DiscountKind::Fixed,
            value: 20_000,
            min_order_amount: 0,
            max_discount: None,
            expires_at: Some(Utc::now() - Duration::days(1)),
        };

        let result = checkout(&mut store, vec![line(1, 100_000, 1)], Some(coupon), 0, Utc::now());

        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_shipping_fee_is_rejected() {
        let mut store = AppStore::new();
        assert_matches!(
            checkout(&mut store, vec![], None, -1, Utc::now()),
            Err(CoreError::Validation(_))
        );
    }
}
