//! # Error Types
//!
//! Domain-specific error types for bitebox-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bitebox-core errors (this file)                                        │
//! │  ├── CoreError        - Lookup and checkout failures                    │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  bitebox-app errors                                                     │
//! │  ├── ConfigError      - Config file / environment problems              │
//! │  └── ApiError         - What the presentation layer sees (serialized)   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Presentation            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations never produce errors: a missing id, the quantity floor and
//! an empty cart all resolve to no-ops or zero values.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No menu entry with this id exists in the catalog.
    #[error("Menu item not found: {0}")]
    MenuEntryNotFound(String),

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Checkout attempted with nothing in the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: (empty)
    ///      │
    ///      ▼
    /// place_order()
    ///      │
    ///      ▼
    /// EmptyCart ──► UI shows "Your cart is empty"
    /// ```
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    /// Tracking cannot advance past the final step.
    #[error("Order {0} has already been delivered")]
    OrderAlreadyDelivered(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed order id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
