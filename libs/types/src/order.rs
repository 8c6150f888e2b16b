//! Order lifecycle types
//!
//! An order is a resting or incoming instruction. After admission its price
//! is fixed; the only mutations are `fill`, which reduces the remaining
//! amount, and `cancel`, which zeroes it.

use crate::ids::{MarketId, OrderId};
use crate::numeric::Price;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// +1 for buys, -1 for sells
    pub fn sign(&self) -> Decimal {
        match self {
            Side::Buy => Decimal::ONE,
            Side::Sell => Decimal::NEGATIVE_ONE,
        }
    }
}

/// Order type
///
/// `SyntheticMargin` orders represent a conditional exposure that any new
/// trade on the owning account invalidates; submitting or matching one
/// triggers cross-market cancellation of the account's synthetic orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    Limit,
    Market,
    SyntheticMargin,
}

/// A resting or incoming order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub symbol: MarketId,
    pub side: Side,
    pub price: Price,
    /// Unfilled amount, only ever decreasing
    pub remaining: Decimal,
    pub filled_amount: Decimal,
    pub order_type: OrderType,
    /// Username of the owning account
    pub owner: String,
    /// Unix millis at creation; admission tie-breaks use queue order
    pub created_at: i64,
    pub filled: bool,
}

impl Order {
    pub fn new(
        symbol: MarketId,
        side: Side,
        price: Price,
        amount: Decimal,
        owner: impl Into<String>,
        order_type: OrderType,
    ) -> Self {
        assert!(amount > Decimal::ZERO, "order amount must be positive");
        Self {
            id: OrderId::new(),
            symbol,
            side,
            price,
            remaining: amount,
            filled_amount: Decimal::ZERO,
            order_type,
            owner: owner.into(),
            created_at: Utc::now().timestamp_millis(),
            filled: false,
        }
    }

    /// Reduce the remaining amount by a fill
    ///
    /// Marks the order filled once the remainder reaches zero, clamping any
    /// sub-precision rounding dust from proportional allocation.
    pub fn fill(&mut self, amount: Decimal) {
        self.filled_amount += amount;
        self.remaining -= amount;
        if self.remaining <= Decimal::ZERO {
            self.remaining = Decimal::ZERO;
            self.filled = true;
        }
    }

    /// Cancel the order: zero the remainder and mark it terminal
    pub fn cancel(&mut self) {
        self.remaining = Decimal::ZERO;
        self.filled = true;
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Remaining amount signed by side (+ buys, − sells)
    pub fn signed_remaining(&self) -> Decimal {
        self.side.sign() * self.remaining
    }

    /// Invariant: `remaining == 0 ⇔ filled`
    pub fn check_invariant(&self) -> bool {
        self.remaining.is_zero() == self.filled
    }
}
