//! Types library for the prediction-market exchange
//!
//! Core type definitions shared across the trading services: identifiers,
//! the fixed-point price grid, market listings, the order/trade lifecycle,
//! account ledgers and the error taxonomy.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, TradeId, MarketId)
//! - `numeric`: Fixed-point price on the [0, 1] probability grid
//! - `market`: Immutable market listings (tick, fees, expiry)
//! - `order`: Order lifecycle types
//! - `trade`: Immutable trade records
//! - `account`: Balance and position ledgers
//! - `errors`: Error taxonomy

pub mod account;
pub mod errors;
pub mod ids;
pub mod market;
pub mod numeric;
pub mod order;
pub mod trade;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::account::*;
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::market::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::trade::*;
}
