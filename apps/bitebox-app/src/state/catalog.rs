//! # Catalog State
//!
//! The catalog never changes during a session, so it is shared behind a plain
//! `Arc` with no lock.

use std::sync::Arc;

use bitebox_core::Catalog;

/// Session-managed, read-only catalog.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// The built-in mock restaurants.
    pub fn sample() -> Self {
        Self::new(Catalog::sample())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::sample()
    }
}
