//! Engine event stream
//!
//! Every externally visible state change leaves the engine as exactly one
//! event: an order update (admission, partial fill, full fill, cancellation)
//! or a new trade. Events are tagged JSON objects on the wire, consumed by
//! downstream feeds and the store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{MarketId, OrderId};
use types::numeric::Price;
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

/// Point-in-time view of one order, as published on the event stream
///
/// `amount` is the remaining amount signed by side, so zero announces a
/// terminal order (fully filled or cancelled) without a separate status
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub symbol: MarketId,
    pub side: Side,
    pub price: Price,
    pub amount: Decimal,
    pub order_type: OrderType,
    pub timestamp: i64,
}

impl From<&Order> for OrderSnapshot {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            symbol: order.symbol.clone(),
            side: order.side,
            price: order.price,
            amount: order.signed_remaining(),
            order_type: order.order_type,
            timestamp: order.created_at,
        }
    }
}

/// A state change published by the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EngineEvent {
    OrderUpdate(OrderSnapshot),
    NewTrade(Trade),
}

impl EngineEvent {
    pub fn order_update(order: &Order) -> Self {
        EngineEvent::OrderUpdate(OrderSnapshot::from(order))
    }

    pub fn new_trade(trade: Trade) -> Self {
        EngineEvent::NewTrade(trade)
    }
}
