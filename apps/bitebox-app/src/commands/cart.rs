//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Screen  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                        place_order        │
//! │                   increment / decrement              (checkout.rs)      │
//! │                   remove_from_cart                        │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ──────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Increment, decrement and remove on an id that is not in the cart change
//! nothing and still return the current cart.

use serde::Serialize;
use tracing::debug;

use bitebox_core::validation::validate_quantity;
use bitebox_core::{CartLine, CartStore, OrderTotals, PriceBreakdown};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

/// Order summary rows, in cents and preformatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct dishes.
    pub line_count: usize,
    /// Units across all lines (the badge on the cart tab).
    pub item_count: u64,
    pub breakdown: PriceBreakdown,
    pub subtotal_display: String,
    pub delivery_fee_display: String,
    pub tax_display: String,
    pub total_display: String,
}

impl CartTotals {
    pub fn from_cart(cart: &CartStore, config: &ConfigState) -> Self {
        let breakdown = OrderTotals::for_cart(cart, &config.charges()).breakdown();

        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            breakdown,
            subtotal_display: config.format_currency(breakdown.subtotal.cents()),
            delivery_fee_display: config.format_currency(breakdown.delivery_fee.cents()),
            tax_display: config.format_currency(breakdown.tax.cents()),
            total_display: config.format_currency(breakdown.total.cents()),
        }
    }
}

impl CartResponse {
    pub fn from_cart(cart: &CartStore, config: &ConfigState) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from_cart(cart, config),
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart Screen                                                            │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  YOUR CART                                         3 items     │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Classic Burger          [-] 1 [+]               $9.99        │    │
/// │  │  French Fries            [-] 2 [+]               $7.98        │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Subtotal                                        $17.97       │    │
/// │  │  Delivery Fee                                    $2.99        │    │
/// │  │  Tax (10%)                                       $1.80        │    │
/// │  │  ──────────────────────────────────────────────────           │    │
/// │  │  TOTAL                                           $22.76       │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from_cart(c, config))
}

/// Adds a menu item to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases
/// - Not in cart: appended as a new line
/// - Price and name are frozen at the time of adding
///
/// ## Arguments
/// * `menu_item_id` - Menu entry id from the restaurant screen
/// * `quantity` - Quantity to add (default: 1, at most 99 per gesture)
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    config: &ConfigState,
    menu_item_id: &str,
    quantity: Option<u32>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(menu_item_id = %menu_item_id, quantity = %quantity, "add_to_cart command");

    validate_quantity(quantity)?;

    let entry = catalog.catalog().find_menu_entry(menu_item_id)?;

    if !entry.is_available() {
        return Err(ApiError::validation(format!(
            "{} is currently unavailable",
            entry.name
        )));
    }

    Ok(cart.with_cart_mut(|c| {
        c.add_item(entry, quantity);
        CartResponse::from_cart(c, config)
    }))
}

/// The `+` button on a cart line.
pub fn increment_cart_item(cart: &CartState, config: &ConfigState, item_id: &str) -> CartResponse {
    debug!(item_id = %item_id, "increment_cart_item command");
    cart.with_cart_mut(|c| {
        c.increment_quantity(item_id);
        CartResponse::from_cart(c, config)
    })
}

/// The `-` button on a cart line. Stops at 1.
pub fn decrement_cart_item(cart: &CartState, config: &ConfigState, item_id: &str) -> CartResponse {
    debug!(item_id = %item_id, "decrement_cart_item command");
    cart.with_cart_mut(|c| {
        c.decrement_quantity(item_id);
        CartResponse::from_cart(c, config)
    })
}

pub fn remove_from_cart(cart: &CartState, config: &ConfigState, item_id: &str) -> CartResponse {
    debug!(item_id = %item_id, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        if !c.remove_item(item_id) {
            debug!(item_id = %item_id, "remove_from_cart: item not in cart");
        }
        CartResponse::from_cart(c, config)
    })
}

pub fn clear_cart(cart: &CartState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from_cart(c, config)
    })
}
