//! Error taxonomy for the trading core
//!
//! Validation and not-found failures reject a single operation and leave all
//! other state untouched; collaborator failures are logged and swallowed at
//! the call site, never aborting an in-progress match.

use crate::ids::{OrderId, TradeId};
use crate::numeric::Price;
use crate::order::Side;
use thiserror::Error;

/// Orderbook and price-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookError {
    #[error("price {price} is not on the market's price grid")]
    InvalidPrice { price: String },

    #[error("level {price} holds {resident:?} orders, cannot add {incoming:?}")]
    SideMismatch {
        price: Price,
        resident: Side,
        incoming: Side,
    },

    #[error("order {order_id} not found at level {price}")]
    OrderNotFound { order_id: OrderId, price: Price },
}

/// Matching engine errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Book(#[from] BookError),

    #[error("synthetic margin matching is not implemented")]
    NotImplemented,
}

/// Failures from persistence or event-stream collaborators
///
/// Best-effort relative to the in-memory book, which stays authoritative.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to record order {0}")]
    OrderWrite(OrderId),

    #[error("failed to record trade {0}")]
    TradeWrite(TradeId),
}

/// Top-level error surfaced to order submitters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("unknown market symbol: {0}")]
    UnknownSymbol(String),

    #[error("invalid order request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<BookError> for ExchangeError {
    fn from(err: BookError) -> Self {
        ExchangeError::Engine(EngineError::Book(err))
    }
}
