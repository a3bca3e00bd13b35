//! # bitebox-core: Pure Ordering Logic for BiteBox
//!
//! Everything the food-ordering app computes lives here as plain data and
//! pure functions, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BiteBox Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation (screens)                       │   │
//! │  │   Home ──► Restaurant Menu ──► Cart ──► Checkout ──► Tracking   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bitebox-app (session shell)                  │   │
//! │  │    CartState (Mutex) • ConfigState • console driver             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bitebox-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  money  │ │ catalog │ │  cart   │ │ checkout │ │ orders │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer cents and exact sub-cent amounts
//! - [`types`] - Tax rate, payment method
//! - [`catalog`] - Restaurants, categories, menus, mock fixtures, search
//! - [`cart`] - The session cart store
//! - [`checkout`] - Order totals, checkout form, order placement
//! - [`orders`] - Placed orders and mock tracking
//! - [`validation`] - Field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bitebox_core::cart::CartStore;
//! use bitebox_core::catalog::Catalog;
//! use bitebox_core::checkout::{Charges, OrderTotals};
//!
//! let catalog = Catalog::sample();
//! let mut cart = CartStore::new();
//!
//! cart.add_item(catalog.find_menu_entry("101").unwrap(), 1); // $9.99
//! cart.add_item(catalog.find_menu_entry("104").unwrap(), 2); // 2 × $3.99
//!
//! let totals = OrderTotals::for_cart(&cart, &Charges::default());
//! assert_eq!(totals.subtotal().cents(), 1797);
//! assert_eq!(totals.grand_total_display().cents(), 2276); // $22.76
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod orders;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLine, CartStore};
pub use catalog::{Catalog, MenuEntry};
pub use checkout::{Charges, CheckoutForm, OrderTotals, PriceBreakdown};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, PreciseMoney};
pub use orders::{Order, OrderBook, OrderStatus};
pub use types::{PaymentMethod, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest quantity a single "add" gesture may request.
///
/// ## Business Reason
/// Guards against typing 100 instead of 10 in the quantity picker. The cart
/// itself does not cap accumulated quantities.
pub const MAX_ITEM_QUANTITY: u32 = 99;

/// Flat delivery fee, $2.99.
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 299;

/// Sales tax, 10%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Promised minutes from order placement to delivery.
pub const DEFAULT_DELIVERY_MINUTES: u32 = 45;
