//! # State Module
//!
//! Manages session state for the BiteBox shell.
//!
//! Each concern gets its own state type so commands declare exactly what they
//! touch, and independent states never block each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Session                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │      ┌───────────────┬───────┴───────┬────────────────┐                 │
//! │      ▼               ▼               ▼                ▼                 │
//! │  ┌──────────┐  ┌────────────┐  ┌─────────────┐  ┌─────────────┐         │
//! │  │CartState │  │CatalogState│  │ OrdersState │  │ ConfigState │         │
//! │  │ Arc<Mutex│  │ Arc<Catalog│  │ Arc<Mutex<  │  │ fee, tax,   │         │
//! │  │ <Cart>>  │  │ >          │  │ OrderBook>> │  │ ETA         │         │
//! │  └──────────┘  └────────────┘  └─────────────┘  └─────────────┘         │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState / OrdersState: exclusive access through a Mutex           │
//! │  • CatalogState / ConfigState: read-only after initialization          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod orders;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{ConfigState, CONFIG_PATH_ENV};
pub use orders::OrdersState;

/// Everything one shopper's session holds.
#[derive(Debug, Clone)]
pub struct Session {
    pub cart: CartState,
    pub catalog: CatalogState,
    pub orders: OrdersState,
    pub config: ConfigState,
}

impl Session {
    /// A fresh session over the built-in catalog.
    pub fn new(config: ConfigState) -> Self {
        Self::with_catalog(config, CatalogState::sample())
    }

    pub fn with_catalog(config: ConfigState, catalog: CatalogState) -> Self {
        Session {
            cart: CartState::new(),
            catalog,
            orders: OrdersState::new(),
            config,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ConfigState::default())
    }
}
