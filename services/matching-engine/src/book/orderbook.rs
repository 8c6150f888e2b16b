//! Per-market order book
//!
//! Owns the full ladder of price levels for one market and tracks the best
//! bid and best ask. The ladder is pre-allocated at construction: every grid
//! price from one tick up to 1.0 exists as an (initially empty) level, so
//! admission never allocates and an off-grid price shows up as a plain
//! lookup miss.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::errors::BookError;
use types::ids::{MarketId, OrderId};
use types::market::Market;
use types::numeric::{Price, PRICE_SCALE};
use types::order::{Order, Side};

use super::price_level::{Discipline, PriceLevel};

/// One live order in a book snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    pub order_id: OrderId,
    pub price: Price,
    /// Remaining amount signed by side (+ bids, − asks)
    pub amount: Decimal,
}

/// The order book for one market
///
/// Invariants:
/// - `best_bid` is the maximum active bid price, `None` when no bids rest
/// - `best_ask` is the minimum active ask price, `None` when no asks rest
/// - `best_bid < best_ask` whenever both exist
pub struct Orderbook {
    market: Arc<Market>,
    discipline: Discipline,
    levels: BTreeMap<Price, PriceLevel>,
    best_bid: Option<Price>,
    best_ask: Option<Price>,
    active_bids: BTreeSet<Price>,
    active_asks: BTreeSet<Price>,
}

impl Orderbook {
    /// Build the pre-allocated ladder for a market
    pub fn new(market: Arc<Market>, discipline: Discipline) -> Self {
        let tick = market.tick_size;
        let mut levels = BTreeMap::new();
        for step in 1..=(PRICE_SCALE / tick) {
            let price = Price::from_bps(step * tick);
            levels.insert(price, PriceLevel::new(price, discipline));
        }
        Self {
            market,
            discipline,
            levels,
            best_bid: None,
            best_ask: None,
            active_bids: BTreeSet::new(),
            active_asks: BTreeSet::new(),
        }
    }

    pub fn market(&self) -> &MarketId {
        &self.market.id
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Maximum active bid price, `None` when no bids rest
    pub fn best_bid(&self) -> Option<Price> {
        self.best_bid
    }

    /// Minimum active ask price, `None` when no asks rest
    pub fn best_ask(&self) -> Option<Price> {
        self.best_ask
    }

    /// Reject prices that do not land exactly on the market's grid
    pub fn validate_price(&self, price: Price) -> Result<(), BookError> {
        if !price.is_on_grid(self.market.tick_size) {
            return Err(BookError::InvalidPrice {
                price: price.to_string(),
            });
        }
        Ok(())
    }

    /// Admit a resting order
    ///
    /// Fails without mutating any state when the price is off-grid or the
    /// target level holds the opposite side.
    pub fn add_order(&mut self, order: Order) -> Result<(), BookError> {
        self.validate_price(order.price)?;
        let price = order.price;
        let side = order.side;
        let level = self
            .levels
            .get_mut(&price)
            .ok_or_else(|| BookError::InvalidPrice {
                price: price.to_string(),
            })?;
        level.add(order)?;

        match side {
            Side::Buy => {
                self.active_bids.insert(price);
                if self.best_bid.map_or(true, |best| price > best) {
                    self.best_bid = Some(price);
                    tracing::debug!(%price, "new best bid");
                }
            }
            Side::Sell => {
                self.active_asks.insert(price);
                if self.best_ask.map_or(true, |best| price < best) {
                    self.best_ask = Some(price);
                    tracing::debug!(%price, "new best ask");
                }
            }
        }
        Ok(())
    }

    /// Remove a resting order, returning it
    ///
    /// When the removal empties the level at the current best price, the new
    /// best is taken from the sorted active-price set rather than a walk of
    /// the full ladder.
    pub fn remove_order(
        &mut self,
        order_id: &OrderId,
        price: Price,
        side: Side,
    ) -> Result<Order, BookError> {
        let level = self
            .levels
            .get_mut(&price)
            .ok_or_else(|| BookError::InvalidPrice {
                price: price.to_string(),
            })?;
        let removed = level.remove(order_id)?;
        debug_assert_eq!(removed.side, side, "removal side disagrees with book");

        if level.is_empty() {
            match side {
                Side::Buy => {
                    self.active_bids.remove(&price);
                    if self.best_bid == Some(price) {
                        self.best_bid = self.active_bids.iter().next_back().copied();
                        tracing::debug!(best_bid = ?self.best_bid, "best bid rescanned");
                    }
                }
                Side::Sell => {
                    self.active_asks.remove(&price);
                    if self.best_ask == Some(price) {
                        self.best_ask = self.active_asks.iter().next().copied();
                        tracing::debug!(best_ask = ?self.best_ask, "best ask rescanned");
                    }
                }
            }
        }
        Ok(removed)
    }

    pub fn level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    pub(crate) fn level_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Every live order at every active level: bids price-descending, then
    /// asks price-ascending
    pub fn snapshot(&self) -> Vec<BookEntry> {
        let mut entries = Vec::new();
        for price in self.active_bids.iter().rev() {
            if let Some(level) = self.levels.get(price) {
                entries.extend(level.orders().map(|order| BookEntry {
                    order_id: order.id,
                    price: order.price,
                    amount: order.signed_remaining(),
                }));
            }
        }
        for price in self.active_asks.iter() {
            if let Some(level) = self.levels.get(price) {
                entries.extend(level.orders().map(|order| BookEntry {
                    order_id: order.id,
                    price: order.price,
                    amount: order.signed_remaining(),
                }));
            }
        }
        entries
    }
}
