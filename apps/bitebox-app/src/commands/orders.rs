//! # Order Commands
//!
//! The "Your Orders" list and the tracking screen.

use serde::Serialize;
use tracing::debug;

use bitebox_core::orders::TrackingStep;
use bitebox_core::validation::validate_uuid;
use bitebox_core::Order;

use crate::error::ApiError;
use crate::state::OrdersState;

/// An order with its tracking timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub order: Order,
    pub steps: Vec<TrackingStep>,
}

impl From<&Order> for TrackingResponse {
    fn from(order: &Order) -> Self {
        TrackingResponse {
            order: order.clone(),
            steps: order.tracking_steps(),
        }
    }
}

/// Orders placed this session, newest first.
pub fn list_orders(orders: &OrdersState) -> Vec<Order> {
    debug!("list_orders command");
    orders.with_orders(|book| book.list().into_iter().cloned().collect())
}

pub fn track_order(orders: &OrdersState, order_id: &str) -> Result<TrackingResponse, ApiError> {
    debug!(order_id = %order_id, "track_order command");
    validate_uuid(order_id)?;

    orders.with_orders(|book| -> Result<TrackingResponse, ApiError> {
        let order = book.get(order_id.trim())?;
        Ok(TrackingResponse::from(order))
    })
}

/// Moves an order one step along its timeline.
///
/// Nothing advances orders automatically; this is the only way they progress.
pub fn advance_order(orders: &OrdersState, order_id: &str) -> Result<TrackingResponse, ApiError> {
    debug!(order_id = %order_id, "advance_order command");
    validate_uuid(order_id)?;
    let order_id = order_id.trim();

    orders.with_orders_mut(|book| -> Result<TrackingResponse, ApiError> {
        book.advance(order_id)?;
        Ok(TrackingResponse::from(book.get(order_id)?))
    })
}
