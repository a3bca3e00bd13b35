//! # Orders
//!
//! Placed orders and their (mock) delivery progress.
//!
//! ## Status Progression
//! ```text
//! ┌───────────┐     ┌───────────┐     ┌────────────────┐     ┌───────────┐
//! │ Confirmed │────►│ Preparing │────►│ OutForDelivery │────►│ Delivered │
//! └───────────┘     └───────────┘     └────────────────┘     └───────────┘
//!  ◄──────────────── in progress ───────────────────────►      final
//! ```
//!
//! Nothing advances on its own: there is no courier feed, so progress only
//! moves when [`OrderBook::advance`] is called.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartStore;
use crate::checkout::{CheckoutForm, PriceBreakdown};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::PaymentMethod;

// =============================================================================
// Order Status
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Every status, in delivery order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// Step title on the tracking screen.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Order Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// The following step, `None` once delivered.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Badge shown in the order list: "In Progress" until delivered.
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, OrderStatus::Delivered)
    }
}

// =============================================================================
// Order
// =============================================================================

/// One row of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub line_total: Money,
}

/// A step on the tracking screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStep {
    pub status: OrderStatus,
    pub title: String,
    pub completed: bool,
}

/// A placed order, kept for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// UUID v4.
    pub id: String,
    pub items: Vec<OrderItem>,
    pub breakdown: PriceBreakdown,
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
    pub phone: String,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub estimated_delivery: DateTime<Utc>,
}

impl Order {
    /// Freezes the cart contents into a new `Confirmed` order.
    pub fn from_cart(
        cart: &CartStore,
        form: &CheckoutForm,
        breakdown: PriceBreakdown,
        placed_at: DateTime<Utc>,
        delivery_minutes: u32,
    ) -> Self {
        let items = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                id: line.id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect();

        Order {
            id: Uuid::new_v4().to_string(),
            items,
            breakdown,
            payment_method: form.payment_method,
            delivery_address: form.address.trim().to_string(),
            phone: form.phone.trim().to_string(),
            status: OrderStatus::Confirmed,
            placed_at,
            estimated_delivery: placed_at + Duration::minutes(i64::from(delivery_minutes)),
        }
    }

    /// The four tracking steps, completed up to and including the current
    /// status.
    pub fn tracking_steps(&self) -> Vec<TrackingStep> {
        OrderStatus::ALL
            .iter()
            .map(|status| TrackingStep {
                status: *status,
                title: status.label().to_string(),
                completed: *status <= self.status,
            })
            .collect()
    }

    /// Total units ordered.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

// =============================================================================
// Order Book
// =============================================================================

/// Orders placed during this session. Dropped with the session.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a freshly placed order and returns its id.
    pub fn record(&mut self, order: Order) -> String {
        debug!(order_id = %order.id, "order recorded");
        let id = order.id.clone();
        self.orders.push(order);
        id
    }

    /// Newest first, as on the "Your Orders" screen.
    pub fn list(&self) -> Vec<&Order> {
        self.orders.iter().rev().collect()
    }

    pub fn get(&self, id: &str) -> CoreResult<&Order> {
        self.orders
            .iter()
            .find(|order| order.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))
    }

    /// Moves an order to its next status and returns it.
    pub fn advance(&mut self, id: &str) -> CoreResult<OrderStatus> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))?;

        let next = order
            .status
            .next()
            .ok_or_else(|| CoreError::OrderAlreadyDelivered(id.to_string()))?;

        order.status = next;
        debug!(order_id = %id, status = ?next, "order advanced");
        Ok(next)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MenuEntry;
    use crate::checkout::{Charges, OrderTotals};

    fn placed_order() -> Order {
        let mut cart = CartStore::new();
        cart.add_item(&MenuEntry::new("101", "Classic Cheeseburger", Money::from_cents(999)), 1);
        cart.add_item(&MenuEntry::new("104", "French Fries", Money::from_cents(399)), 2);

        let form = CheckoutForm::new("  123 Main St ", " 555-0100 ", PaymentMethod::Card);
        let breakdown = OrderTotals::for_cart(&cart, &Charges::default()).breakdown();
        Order::from_cart(&cart, &form, breakdown, Utc::now(), 45)
    }

    #[test]
    fn test_status_progression() {
        assert_eq!(OrderStatus::Confirmed.next(), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::Preparing.next(), Some(OrderStatus::OutForDelivery));
        assert_eq!(OrderStatus::OutForDelivery.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);

        assert!(OrderStatus::OutForDelivery.is_in_progress());
        assert!(!OrderStatus::Delivered.is_in_progress());
    }

    #[test]
    fn test_from_cart_freezes_lines() {
        let order = placed_order();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[1].name, "French Fries");
        assert_eq!(order.items[1].line_total.cents(), 798);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.delivery_address, "123 Main St");
        assert_eq!(order.phone, "555-0100");
        assert!(Uuid::parse_str(&order.id).is_ok());
        assert_eq!(order.estimated_delivery - order.placed_at, Duration::minutes(45));
    }

    #[test]
    fn test_tracking_steps() {
        let mut order = placed_order();
        let completed = |o: &Order| o.tracking_steps().iter().filter(|s| s.completed).count();

        assert_eq!(completed(&order), 1);

        order.status = OrderStatus::OutForDelivery;
        let steps = order.tracking_steps();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[2].title, "Out for Delivery");
        assert!(steps[2].completed);
        assert!(!steps[3].completed);

        order.status = OrderStatus::Delivered;
        assert_eq!(completed(&order), 4);
    }

    #[test]
    fn test_order_book_lists_newest_first() {
        let mut book = OrderBook::new();
        let first = book.record(placed_order());
        let second = book.record(placed_order());

        let ids: Vec<&str> = book.list().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, [second.as_str(), first.as_str()]);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_advance_until_delivered() {
        let mut book = OrderBook::new();
        let id = book.record(placed_order());

        assert_eq!(book.advance(&id).unwrap(), OrderStatus::Preparing);
        assert_eq!(book.advance(&id).unwrap(), OrderStatus::OutForDelivery);
        assert_eq!(book.advance(&id).unwrap(), OrderStatus::Delivered);
        assert!(matches!(
            book.advance(&id),
            Err(CoreError::OrderAlreadyDelivered(_))
        ));
        assert_eq!(book.get(&id).unwrap().status, OrderStatus::Delivered);
    }

    #[test]
    fn test_record_returns_the_stored_id() {
        let mut book = OrderBook::new();
        let order = placed_order();
        let expected = order.id.clone();

        let id = book.record(order);

        assert_eq!(id, expected);
        assert_eq!(book.get(&id).unwrap().id, expected);
        assert_eq!(book.list()[0].id, expected);
    }

    #[test]
    fn test_unknown_order() {
        let mut book = OrderBook::new();
        assert!(matches!(book.get("missing"), Err(CoreError::OrderNotFound(_))));
        assert!(matches!(book.advance("missing"), Err(CoreError::OrderNotFound(_))));
    }
}
