//! Trade record types
//!
//! A trade is the immutable record of one match between a resting (maker)
//! order and an incoming (taker) order. Created exactly once per match,
//! never mutated, never deleted.

use crate::ids::{MarketId, OrderId, TradeId};
use crate::market::Market;
use crate::numeric::Price;
use crate::order::{Order, Side};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable match record
///
/// `side` is the taker's side; the execution price is always the maker's
/// resting price. Fees are computed from the market's schedule at
/// construction and recorded here; settlement does not yet deduct them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: TradeId,
    pub symbol: MarketId,
    pub side: Side,
    pub price: Price,
    pub amount: Decimal,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    pub maker_owner: String,
    pub taker_owner: String,
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
    /// Unix millis
    pub executed_at: i64,
}

impl Trade {
    pub fn new(
        market: &Market,
        side: Side,
        price: Price,
        amount: Decimal,
        maker: &Order,
        taker: &Order,
    ) -> Self {
        debug_assert!(amount > Decimal::ZERO, "trade amount must be positive");
        Self {
            id: TradeId::new(),
            symbol: market.id.clone(),
            side,
            price,
            amount,
            maker_order_id: maker.id,
            taker_order_id: taker.id,
            maker_owner: maker.owner.clone(),
            taker_owner: taker.owner.clone(),
            maker_fee: market.maker_fee(price, amount),
            taker_fee: market.taker_fee(price, amount),
            executed_at: Utc::now().timestamp_millis(),
        }
    }

    /// Notional value: price × amount
    pub fn value(&self) -> Decimal {
        self.price.as_decimal() * self.amount
    }
}
