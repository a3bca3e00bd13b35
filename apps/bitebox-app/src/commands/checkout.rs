//! # Checkout Commands
//!
//! Order summary and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  checkout_summary ──► user fills address + phone, picks payment         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  place_order ──► form valid? ──no──► VALIDATION_ERROR (cart untouched)  │
//! │                      │                                                  │
//! │                     yes                                                 │
//! │                      ▼                                                  │
//! │                 cart empty? ──yes──► CART_ERROR (cart untouched)        │
//! │                      │                                                  │
//! │                      no                                                 │
//! │                      ▼                                                  │
//! │          Order recorded, cart cleared ──► tracking screen               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No payment is taken. The payment method is only recorded on the order.

use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use bitebox_core::checkout;
use bitebox_core::{CartLine, CheckoutForm, Order};

use crate::commands::cart::CartTotals;
use crate::error::ApiError;
use crate::state::{CartState, ConfigState, OrdersState};

/// Everything the checkout screen shows before the order is placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    /// Promised minutes from placement to delivery.
    pub estimated_delivery_minutes: u32,
}

pub fn checkout_summary(cart: &CartState, config: &ConfigState) -> CheckoutSummary {
    debug!("checkout_summary command");
    cart.with_cart(|c| CheckoutSummary {
        lines: c.lines().to_vec(),
        totals: CartTotals::from_cart(c, config),
        estimated_delivery_minutes: config.delivery_minutes,
    })
}

/// Places the order and empties the cart.
///
/// ## Returns
/// The placed order, also stored in the session's order list.
pub fn place_order(
    cart: &CartState,
    orders: &OrdersState,
    config: &ConfigState,
    form: CheckoutForm,
) -> Result<Order, ApiError> {
    debug!(payment_method = %form.payment_method, "place_order command");

    let charges = config.charges();
    let order = cart.with_cart_mut(|c| {
        checkout::place_order(c, &form, &charges, config.delivery_minutes, Utc::now())
    })?;

    let placed = order.clone();
    orders.with_orders_mut(|book| book.record(order));
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::state::CatalogState;
    use bitebox_core::{OrderStatus, PaymentMethod};

    fn filled_cart() -> (CartState, ConfigState) {
        let catalog = CatalogState::sample();
        let cart = CartState::new();
        let config = ConfigState::default();
        add_to_cart(&catalog, &cart, &config, "101", None).unwrap();
        add_to_cart(&catalog, &cart, &config, "104", Some(2)).unwrap();
        (cart, config)
    }

    #[test]
    fn test_summary_matches_cart() {
        let (cart, config) = filled_cart();
        let summary = checkout_summary(&cart, &config);

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.totals.total_display, "$22.76");
        assert_eq!(summary.estimated_delivery_minutes, 45);
    }

    #[test]
    fn test_place_order_records_and_clears() {
        let (cart, config) = filled_cart();
        let orders = OrdersState::new();
        let form = CheckoutForm::new(" 1 Main St ", "555-0100", PaymentMethod::Cash);

        let order = place_order(&cart, &orders, &config, form).unwrap();

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.delivery_address, "1 Main St");
        assert_eq!(order.payment_method, PaymentMethod::Cash);
        assert_eq!(order.breakdown.total.cents(), 2276);
        assert_eq!(order.item_count(), 3);
        assert_eq!(
            order.estimated_delivery - order.placed_at,
            chrono::Duration::minutes(45)
        );

        assert!(cart.with_cart(|c| c.is_empty()));
        assert_eq!(orders.with_orders(|book| book.len()), 1);
        let stored = orders.with_orders(|book| book.get(&order.id).map(|o| o.clone()));
        assert_eq!(stored.unwrap(), order);
    }

    #[test]
    fn test_missing_phone_keeps_cart() {
        let (cart, config) = filled_cart();
        let orders = OrdersState::new();
        let form = CheckoutForm::new("1 Main St", "   ", PaymentMethod::Card);

        let err = place_order(&cart, &orders, &config, form).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(cart.with_cart(|c| c.item_count()), 3);
        assert!(orders.with_orders(|book| book.is_empty()));
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let cart = CartState::new();
        let orders = OrdersState::new();
        let form = CheckoutForm::new("1 Main St", "555-0100", PaymentMethod::Card);

        let err = place_order(&cart, &orders, &ConfigState::default(), form).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_configured_charges_apply() {
        let (cart, mut config) = filled_cart();
        config.delivery_fee_cents = 0;
        config.tax_rate_bps = 0;

        let order = place_order(
            &cart,
            &OrdersState::new(),
            &config,
            CheckoutForm::new("1 Main St", "555-0100", PaymentMethod::Card),
        )
        .unwrap();

        assert_eq!(order.breakdown.total.cents(), 1797);
    }
}
