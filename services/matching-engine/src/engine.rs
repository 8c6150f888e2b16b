//! Matching engine for one market
//!
//! Consumes incoming orders against the opposite side of the book, best
//! price first, under the book's priority discipline. Each match produces
//! exactly one trade, settles both legs immediately, and emits events for
//! every order whose state changed.
//!
//! Atomicity: an order is validated before any state is touched, so a
//! rejected order leaves the book, the ledgers and the event stream exactly
//! as they were.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use types::account::Account;
use types::errors::{BookError, EngineError};
use types::ids::OrderId;
use types::market::Market;
use types::numeric::Price;
use types::order::{Order, OrderType, Side};
use types::trade::Trade;

use crate::book::{BookEntry, Discipline, Orderbook};
use crate::events::EngineEvent;
use crate::matching::settle_trade;

/// Engine construction parameters
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub discipline: Discipline,
    /// Fills and residuals at or below this amount are discarded, not traded
    /// or rested
    pub min_trade_amount: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            discipline: Discipline::Fifo,
            min_trade_amount: Decimal::new(1, 3),
        }
    }
}

/// The matching engine for a single market
///
/// Holds the market's book exclusively; the account map is shared with the
/// other engines so cross-market settlement reads one ledger.
pub struct MatchingEngine {
    market: Arc<Market>,
    book: Orderbook,
    accounts: Arc<DashMap<String, Account>>,
    min_trade_amount: Decimal,
}

impl MatchingEngine {
    pub fn new(
        market: Arc<Market>,
        accounts: Arc<DashMap<String, Account>>,
        config: EngineConfig,
    ) -> Self {
        let book = Orderbook::new(Arc::clone(&market), config.discipline);
        Self {
            market,
            book,
            accounts,
            min_trade_amount: config.min_trade_amount,
        }
    }

    pub fn market(&self) -> &Arc<Market> {
        &self.market
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.book.best_bid()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.book.best_ask()
    }

    pub fn snapshot(&self) -> Vec<BookEntry> {
        self.book.snapshot()
    }

    /// Match an incoming order, returning the events it produced
    pub fn process_order(&mut self, order: Order) -> Result<Vec<EngineEvent>, EngineError> {
        tracing::info!(
            order_id = %order.id,
            symbol = %order.symbol,
            side = ?order.side,
            order_type = ?order.order_type,
            amount = %order.remaining,
            "processing order"
        );
        match order.order_type {
            OrderType::Limit => self.process_limit_order(order),
            OrderType::Market => self.process_market_order(order),
            OrderType::SyntheticMargin => Err(EngineError::NotImplemented),
        }
    }

    /// Cancel a resting order, returning its terminal order update
    pub fn cancel_order(
        &mut self,
        order_id: &OrderId,
        price: Price,
        side: Side,
    ) -> Result<EngineEvent, EngineError> {
        let mut order = self.book.remove_order(order_id, price, side)?;
        order.cancel();
        tracing::info!(order_id = %order.id, symbol = %order.symbol, "cancelled order");
        Ok(EngineEvent::order_update(&order))
    }

    fn process_limit_order(&mut self, mut taker: Order) -> Result<Vec<EngineEvent>, EngineError> {
        self.book.validate_price(taker.price)?;
        let mut events = Vec::new();

        while taker.remaining > self.min_trade_amount {
            let crossing = match taker.side {
                Side::Buy => self.book.best_ask().filter(|ask| taker.price >= *ask),
                Side::Sell => self.book.best_bid().filter(|bid| taker.price <= *bid),
            };
            let Some(level_price) = crossing else { break };
            if !self.fill_level(&mut taker, level_price, &mut events)? {
                // The crossing level could not absorb anything; resting the
                // remainder here would place it at or through the opposite
                // best, so it is discarded instead.
                tracing::debug!(
                    order_id = %taker.id,
                    remaining = %taker.remaining,
                    "discarding remainder after stalled crossing level"
                );
                return Ok(events);
            }
        }

        if taker.remaining > self.min_trade_amount {
            self.book.add_order(taker.clone())?;
            events.push(EngineEvent::order_update(&taker));
        } else if !taker.remaining.is_zero() {
            tracing::debug!(
                order_id = %taker.id,
                remaining = %taker.remaining,
                "discarding residual below minimum trade amount"
            );
        }
        Ok(events)
    }

    /// Market orders take whatever liquidity exists and discard the rest;
    /// they carry no price and never rest.
    fn process_market_order(&mut self, mut taker: Order) -> Result<Vec<EngineEvent>, EngineError> {
        let mut events = Vec::new();
        while taker.remaining > self.min_trade_amount {
            let best = match taker.side {
                Side::Buy => self.book.best_ask(),
                Side::Sell => self.book.best_bid(),
            };
            let Some(level_price) = best else { break };
            if !self.fill_level(&mut taker, level_price, &mut events)? {
                break;
            }
        }
        if !taker.remaining.is_zero() {
            tracing::debug!(
                order_id = %taker.id,
                remaining = %taker.remaining,
                "market order exhausted available liquidity"
            );
        }
        Ok(events)
    }

    fn fill_level(
        &mut self,
        taker: &mut Order,
        price: Price,
        events: &mut Vec<EngineEvent>,
    ) -> Result<bool, EngineError> {
        match self.book.discipline() {
            Discipline::Fifo => self.fill_level_fifo(taker, price, events),
            Discipline::ProRata => self.fill_level_pro_rata(taker, price, events),
        }
    }

    /// Consume the earliest-admitted maker at `price`
    ///
    /// Returns whether the book changed; a `false` means the caller must
    /// stop walking this level.
    fn fill_level_fifo(
        &mut self,
        taker: &mut Order,
        price: Price,
        events: &mut Vec<EngineEvent>,
    ) -> Result<bool, EngineError> {
        let market = Arc::clone(&self.market);
        let (maker_id, maker_remaining) = {
            let level = self.level(price)?;
            match level.first_order() {
                Some(maker) => (maker.id, maker.remaining),
                None => return Ok(false),
            }
        };

        if taker.remaining >= maker_remaining {
            // Full consumption comes off the book before the trade, so the
            // best price is already rescanned when the next iteration runs.
            let mut maker = self.book.remove_order(&maker_id, price, taker.side.opposite())?;
            if maker.remaining <= self.min_trade_amount {
                maker.cancel();
                events.push(EngineEvent::order_update(&maker));
                return Ok(true);
            }
            let amount = maker.remaining;
            let trade = Trade::new(&market, taker.side, price, amount, &maker, taker);
            maker.fill(amount);
            taker.fill(amount);
            events.push(EngineEvent::order_update(&maker));
            events.extend(self.process_trade(trade));
        } else {
            let amount = taker.remaining;
            let trade = {
                let level = self.level_mut(price)?;
                let Some(maker) = level.front_mut() else {
                    return Ok(false);
                };
                maker.fill(amount);
                let trade = Trade::new(&market, taker.side, price, amount, maker, taker);
                events.push(EngineEvent::order_update(maker));
                trade
            };
            taker.fill(amount);
            events.extend(self.process_trade(trade));
        }
        Ok(true)
    }

    /// Split the taker across every maker at `price` in proportion to
    /// resting size
    ///
    /// When the taker covers the whole level, every maker fills in full.
    /// Otherwise shares are computed from the pre-fill state, so later fills
    /// in the pass do not skew earlier makers' proportions.
    fn fill_level_pro_rata(
        &mut self,
        taker: &mut Order,
        price: Price,
        events: &mut Vec<EngineEvent>,
    ) -> Result<bool, EngineError> {
        let market = Arc::clone(&self.market);
        let (total, shares) = {
            let level = self.level(price)?;
            let total = level.total_amount();
            if total <= Decimal::ZERO {
                return Ok(false);
            }
            let shares: Vec<(OrderId, Decimal)> = level
                .orders()
                .map(|maker| (maker.id, taker.remaining * maker.remaining / total))
                .collect();
            (total, shares)
        };

        if taker.remaining >= total {
            for (maker_id, _) in shares {
                let mut maker =
                    self.book
                        .remove_order(&maker_id, price, taker.side.opposite())?;
                if maker.remaining <= self.min_trade_amount {
                    maker.cancel();
                    events.push(EngineEvent::order_update(&maker));
                    continue;
                }
                let amount = maker.remaining;
                let trade = Trade::new(&market, taker.side, price, amount, &maker, taker);
                maker.fill(amount);
                taker.fill(amount);
                events.push(EngineEvent::order_update(&maker));
                events.extend(self.process_trade(trade));
            }
            return Ok(true);
        }

        let mut executed = false;
        for (maker_id, share) in shares {
            if share <= self.min_trade_amount {
                tracing::debug!(%maker_id, %share, "skipping pro-rata share at or below minimum");
                continue;
            }
            let trade = {
                let level = self.level_mut(price)?;
                let Some(maker) = level.order_mut(&maker_id) else {
                    continue;
                };
                maker.fill(share);
                let trade = Trade::new(&market, taker.side, price, share, maker, taker);
                events.push(EngineEvent::order_update(maker));
                trade
            };
            taker.fill(share);
            events.extend(self.process_trade(trade));
            executed = true;
        }
        Ok(executed)
    }

    /// Settle a trade into both participants' ledgers and emit it
    fn process_trade(&self, trade: Trade) -> Vec<EngineEvent> {
        tracing::info!(
            trade_id = %trade.id,
            symbol = %trade.symbol,
            price = %trade.price,
            amount = %trade.amount,
            "executed trade"
        );
        settle_trade(&self.accounts, &trade);
        vec![EngineEvent::new_trade(trade)]
    }

    fn level(&self, price: Price) -> Result<&crate::book::PriceLevel, BookError> {
        self.book.level(price).ok_or_else(|| BookError::InvalidPrice {
            price: price.to_string(),
        })
    }

    fn level_mut(&mut self, price: Price) -> Result<&mut crate::book::PriceLevel, BookError> {
        self.book
            .level_mut(price)
            .ok_or_else(|| BookError::InvalidPrice {
                price: price.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::OrderSnapshot;
    use std::str::FromStr;
    use types::ids::MarketId;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn engine(discipline: Discipline) -> MatchingEngine {
        let market = Arc::new(Market::new("trump-impeachment-2020", "TRUMP", 0));
        MatchingEngine::new(
            market,
            Arc::new(DashMap::new()),
            EngineConfig {
                discipline,
                ..EngineConfig::default()
            },
        )
    }

    fn limit(side: Side, bps: u32, amount: &str, owner: &str) -> Order {
        Order::new(
            MarketId::new("TRUMP"),
            side,
            Price::from_bps(bps),
            dec(amount),
            owner,
            OrderType::Limit,
        )
    }

    fn trades(events: &[EngineEvent]) -> Vec<&Trade> {
        events
            .iter()
            .filter_map(|event| match event {
                EngineEvent::NewTrade(trade) => Some(trade),
                _ => None,
            })
            .collect()
    }

    fn order_updates(events: &[EngineEvent]) -> Vec<&OrderSnapshot> {
        events
            .iter()
            .filter_map(|event| match event {
                EngineEvent::OrderUpdate(snapshot) => Some(snapshot),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_non_crossing_limit_rests() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4500, "1.0", "alice"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "1.0", "bob"))
            .unwrap();

        assert!(trades(&events).is_empty());
        assert_eq!(engine.best_bid(), Some(Price::from_bps(4000)));
        assert_eq!(engine.best_ask(), Some(Price::from_bps(4500)));
    }

    #[test]
    fn test_fifo_partial_fill_rests_remainder() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "alice"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "2.5", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].amount, dec("1.0"));
        assert_eq!(trades[0].price, Price::from_bps(4000));
        assert_eq!(trades[0].side, Side::Buy);

        // Maker is gone, taker's remainder flipped the level to the bid side
        assert_eq!(engine.best_ask(), None);
        assert_eq!(engine.best_bid(), Some(Price::from_bps(4000)));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].amount, dec("1.5"));
    }

    #[test]
    fn test_sell_taker_clears_resting_bid() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Buy, 4000, "1.0", "alice"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Sell, 4000, "1.0", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].amount, dec("1.0"));
        assert_eq!(trades[0].side, Side::Sell);
        assert_eq!(engine.best_bid(), None);
        assert_eq!(engine.best_ask(), None);
        assert!(engine.snapshot().is_empty());
    }

    #[test]
    fn test_sell_taker_consumes_bids_in_admission_order() {
        let mut engine = engine(Discipline::Fifo);
        let first = limit(Side::Buy, 3000, "2.0", "alice");
        let second = limit(Side::Buy, 3000, "3.0", "carol");
        let first_id = first.id;
        let second_id = second.id;
        engine.process_order(first).unwrap();
        engine.process_order(second).unwrap();

        let events = engine
            .process_order(limit(Side::Sell, 3000, "4.0", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].maker_order_id, first_id);
        assert_eq!(trades[0].amount, dec("2.0"));
        assert_eq!(trades[1].maker_order_id, second_id);
        assert_eq!(trades[1].amount, dec("2.0"));

        // Second maker stays resident with its remainder
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].order_id, second_id);
        assert_eq!(snapshot[0].amount, dec("1.0"));
    }

    #[test]
    fn test_taker_executes_at_maker_price() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "alice"))
            .unwrap();
        engine
            .process_order(limit(Side::Sell, 4500, "1.0", "carol"))
            .unwrap();

        // Willing to pay 0.45, but the 0.40 ask fills first at 0.40
        let events = engine
            .process_order(limit(Side::Buy, 4500, "2.0", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].price, Price::from_bps(4000));
        assert_eq!(trades[1].price, Price::from_bps(4500));
        assert_eq!(engine.best_ask(), None);
        assert_eq!(engine.best_bid(), None);
    }

    #[test]
    fn test_fifo_time_priority_across_makers() {
        let mut engine = engine(Discipline::Fifo);
        let first = limit(Side::Sell, 4000, "1.0", "alice");
        let first_id = first.id;
        engine.process_order(first).unwrap();
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "carol"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "1.0", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].maker_order_id, first_id);
    }

    #[test]
    fn test_pro_rata_allocation() {
        let mut engine = engine(Discipline::ProRata);
        engine
            .process_order(limit(Side::Sell, 4000, "3.0", "alice"))
            .unwrap();
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "carol"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "2.0", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 2);
        // 2.0 split 3:1 across the level
        assert_eq!(trades[0].amount, dec("1.5"));
        assert_eq!(trades[0].maker_owner, "alice");
        assert_eq!(trades[1].amount, dec("0.5"));
        assert_eq!(trades[1].maker_owner, "carol");

        // Both makers remain with reduced size
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].amount, dec("-1.5"));
        assert_eq!(snapshot[1].amount, dec("-0.5"));
    }

    #[test]
    fn test_pro_rata_taker_covering_level_fills_all() {
        let mut engine = engine(Discipline::ProRata);
        engine
            .process_order(limit(Side::Sell, 4000, "3.0", "alice"))
            .unwrap();
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "carol"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "5.0", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].amount, dec("3.0"));
        assert_eq!(trades[1].amount, dec("1.0"));
        // 1.0 left over rests as the new bid
        assert_eq!(engine.best_ask(), None);
        assert_eq!(engine.best_bid(), Some(Price::from_bps(4000)));
    }

    #[test]
    fn test_fill_conservation() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4000, "1.2", "alice"))
            .unwrap();
        engine
            .process_order(limit(Side::Sell, 4000, "0.8", "carol"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "1.7", "bob"))
            .unwrap();

        let total: Decimal = trades(&events).iter().map(|trade| trade.amount).sum();
        assert_eq!(total, dec("1.7"));
        // Maker side shrank by exactly the traded amount
        let resting: Decimal = engine
            .snapshot()
            .iter()
            .map(|entry| entry.amount.abs())
            .sum();
        assert_eq!(resting, dec("0.3"));
    }

    #[test]
    fn test_off_grid_limit_rejected_atomically() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "alice"))
            .unwrap();

        let result = engine.process_order(limit(Side::Buy, 4025, "1.0", "bob"));
        assert!(matches!(
            result,
            Err(EngineError::Book(BookError::InvalidPrice { .. }))
        ));
        // Nothing traded, nothing rested
        assert_eq!(engine.best_ask(), Some(Price::from_bps(4000)));
        assert_eq!(engine.snapshot().len(), 1);
    }

    #[test]
    fn test_market_order_takes_liquidity_and_discards_rest() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "alice"))
            .unwrap();

        let taker = Order::new(
            MarketId::new("TRUMP"),
            Side::Buy,
            Price::ZERO,
            dec("5.0"),
            "bob",
            OrderType::Market,
        );
        let events = engine.process_order(taker).unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].amount, dec("1.0"));
        // Remainder never rests
        assert!(engine.snapshot().is_empty());
    }

    #[test]
    fn test_dust_remainder_not_rested() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4000, "2.0", "alice"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "2.0005", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].amount, dec("2.0"));
        assert!(engine.snapshot().is_empty());
    }

    #[test]
    fn test_pro_rata_sub_threshold_shares_never_rest_crossing_order() {
        let mut engine = engine(Discipline::ProRata);
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "alice"))
            .unwrap();
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "carol"))
            .unwrap();

        // Each pro-rata share would be 0.00075, under the minimum, so the
        // level absorbs nothing; the crossing remainder must be discarded,
        // never rested above the ask.
        let events = engine
            .process_order(limit(Side::Buy, 4500, "0.0015", "bob"))
            .unwrap();

        assert!(trades(&events).is_empty());
        assert_eq!(engine.best_bid(), None);
        assert_eq!(engine.best_ask(), Some(Price::from_bps(4000)));
        if let (Some(bid), Some(ask)) = (engine.best_bid(), engine.best_ask()) {
            assert!(bid < ask, "book crossed: bid {bid} >= ask {ask}");
        }
    }

    #[test]
    fn test_remainder_at_exact_threshold_discarded() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4000, "2.0", "alice"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "2.001", "bob"))
            .unwrap();

        let trades = trades(&events);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].amount, dec("2.0"));
        // Exactly 0.001 left: at the threshold, not above it
        assert!(engine.snapshot().is_empty());

        // An incoming order at exactly the threshold is discarded outright
        let events = engine
            .process_order(limit(Side::Buy, 4000, "0.001", "bob"))
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(engine.best_bid(), None);
    }

    #[test]
    fn test_settlement_follows_trade() {
        let market = Arc::new(Market::new("m", "TRUMP", 0));
        let accounts = Arc::new(DashMap::new());
        let mut engine = MatchingEngine::new(
            Arc::clone(&market),
            Arc::clone(&accounts),
            EngineConfig::default(),
        );

        engine
            .process_order(limit(Side::Sell, 4000, "10", "alice"))
            .unwrap();
        engine
            .process_order(limit(Side::Buy, 4000, "10", "bob"))
            .unwrap();

        let alice = accounts.get("alice").unwrap();
        let bob = accounts.get("bob").unwrap();
        assert_eq!(alice.position(&market.id), dec("-10"));
        assert_eq!(bob.position(&market.id), dec("10"));
        assert_eq!(alice.balance, dec("-4"));
        assert_eq!(bob.balance, dec("-4"));
    }

    #[test]
    fn test_synthetic_margin_fails_loudly() {
        let mut engine = engine(Discipline::Fifo);
        let order = Order::new(
            MarketId::new("TRUMP"),
            Side::Buy,
            Price::from_bps(4000),
            Decimal::ONE,
            "alice",
            OrderType::SyntheticMargin,
        );

        assert_eq!(
            engine.process_order(order),
            Err(EngineError::NotImplemented)
        );
    }

    #[test]
    fn test_cancel_resting_order() {
        let mut engine = engine(Discipline::Fifo);
        let order = limit(Side::Buy, 4000, "1.0", "alice");
        let id = order.id;
        engine.process_order(order).unwrap();

        let event = engine
            .cancel_order(&id, Price::from_bps(4000), Side::Buy)
            .unwrap();

        match event {
            EngineEvent::OrderUpdate(snapshot) => {
                assert_eq!(snapshot.id, id);
                assert_eq!(snapshot.amount, Decimal::ZERO);
            }
            other => panic!("expected order update, got {other:?}"),
        }
        assert_eq!(engine.best_bid(), None);
    }

    #[test]
    fn test_cancel_unknown_order_fails() {
        let mut engine = engine(Discipline::Fifo);
        let result = engine.cancel_order(&OrderId::new(), Price::from_bps(4000), Side::Buy);
        assert!(matches!(
            result,
            Err(EngineError::Book(BookError::OrderNotFound { .. }))
        ));
    }

    #[test]
    fn test_events_include_maker_update_per_trade() {
        let mut engine = engine(Discipline::Fifo);
        engine
            .process_order(limit(Side::Sell, 4000, "1.0", "alice"))
            .unwrap();

        let events = engine
            .process_order(limit(Side::Buy, 4000, "1.0", "bob"))
            .unwrap();

        let updates = order_updates(&events);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].amount, Decimal::ZERO);
        assert_eq!(trades(&events).len(), 1);
    }
}
