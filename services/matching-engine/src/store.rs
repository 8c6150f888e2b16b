//! Exchange persistence
//!
//! The store records the listing catalogue and the order/trade history. It
//! is best-effort relative to the in-memory books: a failed write is logged
//! by the caller and never rolls back a match.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use types::errors::StoreError;
use types::ids::{MarketId, OrderId};
use types::market::Market;
use types::trade::Trade;

use crate::events::OrderSnapshot;

/// Listing summary served to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInfo {
    pub name: String,
    pub symbol: String,
    /// Unix millis
    pub expiry: i64,
}

impl From<&Market> for MarketInfo {
    fn from(market: &Market) -> Self {
        Self {
            name: market.name.clone(),
            symbol: market.symbol().to_string(),
            expiry: market.expiry,
        }
    }
}

/// Persistence seam for listings, orders and trades
pub trait ExchangeStore: Send + Sync {
    /// Look up a listed market by symbol
    fn find_market_by_symbol(&self, symbol: &str) -> Option<Market>;

    /// All listed markets
    fn list_markets(&self) -> Vec<MarketInfo>;

    /// Latest recorded state of an order
    fn find_order_by_id(&self, order_id: &OrderId) -> Option<OrderSnapshot>;

    /// Record an order state change, overwriting any earlier state
    fn record_order_update(&self, snapshot: &OrderSnapshot) -> Result<(), StoreError>;

    /// Record an executed trade
    fn record_trade(&self, trade: &Trade) -> Result<(), StoreError>;
}

/// In-process store backed by concurrent maps
#[derive(Default)]
pub struct InMemoryStore {
    markets: DashMap<MarketId, Market>,
    orders: DashMap<OrderId, OrderSnapshot>,
    trades: DashMap<MarketId, Vec<Trade>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// List a market, making it routable by symbol
    pub fn add_market(&self, market: Market) {
        tracing::info!(symbol = %market.symbol(), name = %market.name, "listing market");
        self.markets.insert(market.id.clone(), market);
    }

    /// Recorded trades for one market, in execution order
    pub fn trades_for(&self, symbol: &str) -> Vec<Trade> {
        self.trades
            .get(&MarketId::new(symbol))
            .map(|trades| trades.clone())
            .unwrap_or_default()
    }
}

impl ExchangeStore for InMemoryStore {
    fn find_market_by_symbol(&self, symbol: &str) -> Option<Market> {
        self.markets
            .get(&MarketId::new(symbol))
            .map(|market| market.clone())
    }

    fn list_markets(&self) -> Vec<MarketInfo> {
        self.markets
            .iter()
            .map(|entry| MarketInfo::from(entry.value()))
            .collect()
    }

    fn find_order_by_id(&self, order_id: &OrderId) -> Option<OrderSnapshot> {
        self.orders.get(order_id).map(|snapshot| snapshot.clone())
    }

    fn record_order_update(&self, snapshot: &OrderSnapshot) -> Result<(), StoreError> {
        self.orders.insert(snapshot.id, snapshot.clone());
        Ok(())
    }

    fn record_trade(&self, trade: &Trade) -> Result<(), StoreError> {
        self.trades
            .entry(trade.symbol.clone())
            .or_default()
            .push(trade.clone());
        Ok(())
    }
}
