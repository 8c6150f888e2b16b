//! Market listing types
//!
//! A market is the immutable description of one binary-outcome symbol:
//! price-grid resolution, fee schedule and expiry. It carries no behavior
//! beyond exposing these constants; every order, trade and orderbook for
//! the symbol references the same listing.

use crate::ids::MarketId;
use crate::numeric::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default tick: 50 bps, i.e. 200 price levels across [0, 1].
pub const DEFAULT_TICK_SIZE: u32 = 50;

/// An immutable binary-outcome market listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,
    pub name: String,
    /// Expiry as Unix millis
    pub expiry: i64,
    /// Grid tick in basis points
    pub tick_size: u32,
    /// Negative rate is a rebate
    pub maker_fee_rate: Decimal,
    pub taker_fee_rate: Decimal,
}

impl Market {
    /// List a market with the standard tick and fee schedule
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, expiry: i64) -> Self {
        Self {
            id: MarketId::new(symbol),
            name: name.into(),
            expiry,
            tick_size: DEFAULT_TICK_SIZE,
            // -0.5% maker rebate, 1% taker fee
            maker_fee_rate: Decimal::new(-5, 3),
            taker_fee_rate: Decimal::new(1, 2),
        }
    }

    /// List a market with an explicit tick and fee schedule
    pub fn with_schedule(
        name: impl Into<String>,
        symbol: impl Into<String>,
        expiry: i64,
        tick_size: u32,
        maker_fee_rate: Decimal,
        taker_fee_rate: Decimal,
    ) -> Self {
        assert!(tick_size > 0, "tick size must be positive");
        Self {
            id: MarketId::new(symbol),
            name: name.into(),
            expiry,
            tick_size,
            maker_fee_rate,
            taker_fee_rate,
        }
    }

    pub fn symbol(&self) -> &str {
        self.id.as_str()
    }

    /// Maker fee for a fill of `amount` at `price`
    pub fn maker_fee(&self, price: Price, amount: Decimal) -> Decimal {
        price.as_decimal() * amount * self.maker_fee_rate
    }

    /// Taker fee for a fill of `amount` at `price`
    pub fn taker_fee(&self, price: Price, amount: Decimal) -> Decimal {
        price.as_decimal() * amount * self.taker_fee_rate
    }
}
