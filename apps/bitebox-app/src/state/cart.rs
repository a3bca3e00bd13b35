//! # Cart State
//!
//! Shares the session's [`CartStore`] between commands.
//!
//! ## Single Writer
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Commands may be dispatched from more than one task
//! 2. Every mutation must run to completion before the next one starts
//! 3. Readers must never observe a half-applied gesture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command               Lock            CartStore call                   │
//! │  ───────               ────            ──────────────                   │
//! │  add_to_cart ────────► exclusive ────► add_item(entry, q)               │
//! │  increment_cart_item ► exclusive ────► increment_quantity(id)           │
//! │  decrement_cart_item ► exclusive ────► decrement_quantity(id)           │
//! │  remove_from_cart ───► exclusive ────► remove_item(id)                  │
//! │  clear_cart ─────────► exclusive ────► clear()                          │
//! │  get_cart ───────────► exclusive ────► lines / total / item_count       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use bitebox_core::CartStore;

/// Session-managed cart state.
///
/// ## Why Not RwLock?
/// Cart operations are tiny and most of them write.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<CartStore>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(CartStore::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust
    /// use bitebox_app::state::CartState;
    ///
    /// let state = CartState::new();
    /// assert_eq!(state.with_cart(|cart| cart.item_count()), 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        // CartStore methods cannot leave partial state behind, so a poisoned
        // lock still guards a consistent cart.
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitebox_core::{MenuEntry, Money};

    #[test]
    fn test_mutations_are_visible_to_readers() {
        let state = CartState::new();
        let dish = MenuEntry::new("A", "Burger", Money::from_cents(999));

        state.with_cart_mut(|cart| cart.add_item(&dish, 2));

        assert_eq!(state.with_cart(|cart| cart.item_count()), 2);
        assert_eq!(state.with_cart(|cart| cart.total().cents()), 1998);
    }

    #[test]
    fn test_concurrent_writers_are_serialized() {
        let state = CartState::new();
        let dish = MenuEntry::new("A", "Burger", Money::from_cents(999));

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let state = state.clone();
                let dish = dish.clone();
                scope.spawn(move || {
                    for _ in 0..250 {
                        state.with_cart_mut(|cart| cart.add_one(&dish));
                    }
                });
            }
        });

        state.with_cart(|cart| {
            assert_eq!(cart.line_count(), 1);
            assert_eq!(cart.item_count(), 2000);
        });
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let state = CartState::new();
        let dish = MenuEntry::new("A", "Burger", Money::from_cents(999));
        state.with_cart_mut(|cart| cart.add_one(&dish));

        let poisoner = state.clone();
        let result = std::thread::spawn(move || {
            poisoner.with_cart_mut(|_| panic!("gesture handler crashed"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(state.with_cart(|cart| cart.item_count()), 1);
    }
}
