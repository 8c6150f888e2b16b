//! Account ledger types
//!
//! An account is one participant's cash balance plus a signed position per
//! market. Balance and positions are mutated only by trade settlement;
//! accounts are created on first reference and never deleted while orders
//! reference them.

use crate::ids::{MarketId, OrderId};
use crate::numeric::Price;
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reference to a resting synthetic-margin order
///
/// Carries enough book coordinates to cancel the order in whichever market
/// it rests, without a lookup through the owning engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticOrderRef {
    pub symbol: MarketId,
    pub order_id: OrderId,
    pub price: Price,
    pub side: Side,
}

/// One participant's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub balance: Decimal,
    positions: HashMap<MarketId, Decimal>,
    synthetic_orders: Vec<SyntheticOrderRef>,
}

impl Account {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            balance: Decimal::ZERO,
            positions: HashMap::new(),
            synthetic_orders: Vec::new(),
        }
    }

    /// Signed position in a market (zero when never traded)
    pub fn position(&self, market: &MarketId) -> Decimal {
        self.positions.get(market).copied().unwrap_or(Decimal::ZERO)
    }

    /// Accumulate a signed position change
    pub fn apply_position(&mut self, market: &MarketId, change: Decimal) {
        *self.positions.entry(market.clone()).or_insert(Decimal::ZERO) += change;
    }

    /// Accumulate a signed balance change
    pub fn apply_balance(&mut self, change: Decimal) {
        self.balance += change;
    }

    /// Register a resting synthetic-margin order for later cross-cancellation
    pub fn register_synthetic_order(&mut self, order_ref: SyntheticOrderRef) {
        self.synthetic_orders.push(order_ref);
    }

    /// Take the synthetic-margin order set, leaving it empty
    ///
    /// Callers cancel the returned orders; a drained set means the exposure
    /// has been invalidated.
    pub fn drain_synthetic_orders(&mut self) -> Vec<SyntheticOrderRef> {
        std::mem::take(&mut self.synthetic_orders)
    }

    pub fn synthetic_orders(&self) -> &[SyntheticOrderRef] {
        &self.synthetic_orders
    }
}
