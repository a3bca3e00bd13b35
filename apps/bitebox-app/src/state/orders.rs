//! # Orders State
//!
//! Orders placed during the session, shared the same way as the cart.

use std::sync::{Arc, Mutex, PoisonError};

use bitebox_core::OrderBook;

#[derive(Debug, Clone, Default)]
pub struct OrdersState {
    orders: Arc<Mutex<OrderBook>>,
}

impl OrdersState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderBook) -> R,
    {
        let orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        f(&orders)
    }

    pub fn with_orders_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderBook) -> R,
    {
        let mut orders = self.orders.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitebox_core::checkout::{place_order, Charges};
    use bitebox_core::{CartStore, CheckoutForm, MenuEntry, Money, PaymentMethod};
    use chrono::Utc;

    #[test]
    fn test_clones_share_the_same_book() {
        let state = OrdersState::new();
        let other = state.clone();

        let mut cart = CartStore::new();
        cart.add_one(&MenuEntry::new("A", "Burger", Money::from_cents(999)));
        let form = CheckoutForm::new("1 Main St", "555-0100", PaymentMethod::Card);
        let order = place_order(&mut cart, &form, &Charges::default(), 45, Utc::now()).unwrap();

        other.with_orders_mut(|book| {
            book.record(order);
        });

        assert_eq!(state.with_orders(|book| book.len()), 1);
    }
}
