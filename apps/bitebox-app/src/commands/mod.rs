//! # Commands Module
//!
//! Every operation the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Restaurant lists, search, menus
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Order summary and placement
//! ├── orders.rs    ◄─── Order list and tracking
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart (and config for formatting)
//! fn get_cart(cart: &CartState, config: &ConfigState)
//!
//! // Needs the catalog to resolve the menu entry
//! fn add_to_cart(catalog: &CatalogState, cart: &CartState, config: &ConfigState, ...)
//!
//! // Touches cart and orders
//! fn place_order(cart: &CartState, orders: &OrdersState, config: &ConfigState, form)
//! ```
//!
//! Results serialize to camelCase JSON; failures are [`crate::error::ApiError`].

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;
