//! Exchange manager
//!
//! Routes order requests to per-market engines, creating each engine lazily
//! from the store's listing catalogue. Every event an engine emits is
//! recorded in the store and optionally published to the registered sinks;
//! both are best-effort, the in-memory books stay authoritative.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::account::{Account, SyntheticOrderRef};
use types::errors::{EngineError, ExchangeError, StoreError};
use types::ids::{MarketId, OrderId};
use types::numeric::Price;
use types::order::{Order, OrderType, Side};

use crate::book::BookEntry;
use crate::engine::{EngineConfig, MatchingEngine};
use crate::events::EngineEvent;
use crate::store::{ExchangeStore, MarketInfo};

/// An order as submitted by a client
///
/// `price` is required for limit and synthetic-margin orders and ignored
/// for market orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub price: Option<Decimal>,
    pub amount: Decimal,
    pub order_type: OrderType,
    pub owner: String,
}

/// Outbound event stream seam (feeds, websockets)
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &EngineEvent) -> Result<(), StoreError>;
}

/// Routes orders to per-market matching engines
///
/// Engines share one account map so settlement and cross-market synthetic
/// cancellation read a single ledger. Each engine sits behind its own lock;
/// the manager never holds two engine locks at once.
pub struct ExchangeManager {
    engines: DashMap<String, Arc<Mutex<MatchingEngine>>>,
    accounts: Arc<DashMap<String, Account>>,
    store: Arc<dyn ExchangeStore>,
    sinks: Mutex<Vec<Arc<dyn EventSink>>>,
    config: EngineConfig,
}

impl ExchangeManager {
    pub fn new(store: Arc<dyn ExchangeStore>, config: EngineConfig) -> Self {
        Self {
            engines: DashMap::new(),
            accounts: Arc::new(DashMap::new()),
            store,
            sinks: Mutex::new(Vec::new()),
            config,
        }
    }

    pub fn accounts(&self) -> &Arc<DashMap<String, Account>> {
        &self.accounts
    }

    pub fn add_sink(&self, sink: Arc<dyn EventSink>) {
        self.sinks.lock().push(sink);
    }

    pub fn list_markets(&self) -> Vec<MarketInfo> {
        self.store.list_markets()
    }

    /// Submit an order for matching
    ///
    /// A synthetic-margin submission first cancels the owner's resting
    /// synthetic orders in every market, then fails with `NotImplemented`:
    /// the exposure is invalidated even though matching it is unsupported.
    pub fn submit_order(
        &self,
        request: OrderRequest,
        broadcast: bool,
    ) -> Result<Vec<EngineEvent>, ExchangeError> {
        let order = self.build_order(&request)?;
        // Unknown symbol is a hard failure before any preprocessing runs
        let engine = self.engine(&request.symbol)?;

        if order.order_type == OrderType::SyntheticMargin {
            let cancelled = self.cancel_synthetic_orders(&order.owner);
            self.record_events(&cancelled);
            if broadcast {
                self.publish_events(&cancelled);
            }
            return Err(EngineError::NotImplemented.into());
        }
        let events = {
            let mut engine = engine.lock();
            engine.process_order(order).map_err(|err| {
                tracing::warn!(symbol = %request.symbol, %err, "order rejected");
                err
            })?
        };
        self.record_events(&events);
        if broadcast {
            self.publish_events(&events);
        }
        Ok(events)
    }

    /// Cancel a resting order by its book coordinates
    pub fn cancel_order(
        &self,
        symbol: &str,
        order_id: &OrderId,
        price: Price,
        side: Side,
    ) -> Result<EngineEvent, ExchangeError> {
        let engine = self.engine(symbol)?;
        let event = {
            let mut engine = engine.lock();
            engine.cancel_order(order_id, price, side)?
        };
        let events = std::slice::from_ref(&event);
        self.record_events(events);
        self.publish_events(events);
        Ok(event)
    }

    /// Snapshot of one market's book
    pub fn book_snapshot(&self, symbol: &str) -> Result<Vec<BookEntry>, ExchangeError> {
        let engine = self.engine(symbol)?;
        let snapshot = engine.lock().snapshot();
        Ok(snapshot)
    }

    /// Track a resting synthetic-margin order for later cross-cancellation
    pub fn register_synthetic_order(&self, owner: &str, order_ref: SyntheticOrderRef) {
        let mut account = self
            .accounts
            .entry(owner.to_string())
            .or_insert_with(|| Account::new(owner.to_string()));
        account.register_synthetic_order(order_ref);
    }

    /// The engine for `symbol`, created on first use from the listing
    /// catalogue
    fn engine(&self, symbol: &str) -> Result<Arc<Mutex<MatchingEngine>>, ExchangeError> {
        if let Some(engine) = self.engines.get(symbol) {
            return Ok(Arc::clone(&engine));
        }
        let market = self
            .store
            .find_market_by_symbol(symbol)
            .ok_or_else(|| ExchangeError::UnknownSymbol(symbol.to_string()))?;
        tracing::info!(%symbol, "starting matching engine");
        let engine = self
            .engines
            .entry(symbol.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(MatchingEngine::new(
                    Arc::new(market),
                    Arc::clone(&self.accounts),
                    self.config.clone(),
                )))
            })
            .clone();
        Ok(engine)
    }

    fn build_order(&self, request: &OrderRequest) -> Result<Order, ExchangeError> {
        if request.amount <= Decimal::ZERO {
            return Err(ExchangeError::InvalidRequest(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }
        if request.owner.is_empty() {
            return Err(ExchangeError::InvalidRequest("owner is required".into()));
        }
        let price = match request.order_type {
            OrderType::Limit | OrderType::SyntheticMargin => {
                let raw = request.price.ok_or_else(|| {
                    ExchangeError::InvalidRequest("limit order requires a price".into())
                })?;
                Price::try_from_decimal(raw)?
            }
            OrderType::Market => Price::ZERO,
        };
        Ok(Order::new(
            MarketId::new(&request.symbol),
            request.side,
            price,
            request.amount,
            request.owner.clone(),
            request.order_type,
        ))
    }

    /// Cancel the owner's resting synthetic orders across all markets
    ///
    /// The account's reference set is drained before any engine is locked,
    /// and engines are locked one at a time in symbol order. A failed
    /// cancellation is logged and skipped; the remaining references are
    /// still processed.
    fn cancel_synthetic_orders(&self, owner: &str) -> Vec<EngineEvent> {
        let mut refs = match self.accounts.get_mut(owner) {
            Some(mut account) => account.drain_synthetic_orders(),
            None => return Vec::new(),
        };
        refs.sort_by(|left, right| left.symbol.cmp(&right.symbol));

        let mut events = Vec::new();
        for order_ref in refs {
            let result = self
                .engine(order_ref.symbol.as_str())
                .and_then(|engine| {
                    let mut engine = engine.lock();
                    engine
                        .cancel_order(&order_ref.order_id, order_ref.price, order_ref.side)
                        .map_err(ExchangeError::from)
                });
            match result {
                Ok(event) => events.push(event),
                Err(err) => {
                    tracing::warn!(
                        symbol = %order_ref.symbol,
                        order_id = %order_ref.order_id,
                        %err,
                        "failed to cancel synthetic margin order"
                    );
                }
            }
        }
        events
    }

    fn record_events(&self, events: &[EngineEvent]) {
        for event in events {
            let result = match event {
                EngineEvent::OrderUpdate(snapshot) => self.store.record_order_update(snapshot),
                EngineEvent::NewTrade(trade) => self.store.record_trade(trade),
            };
            if let Err(err) = result {
                tracing::warn!(%err, "failed to record event");
            }
        }
    }

    fn publish_events(&self, events: &[EngineEvent]) {
        let sinks = self.sinks.lock();
        for sink in sinks.iter() {
            for event in events {
                if let Err(err) = sink.publish(event) {
                    tracing::warn!(%err, "failed to publish event");
                }
            }
        }
    }
}
