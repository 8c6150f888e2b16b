//! Matching engine for the prediction-market exchange
//!
//! Maintains a per-symbol limit-order book over the [0, 1] probability grid,
//! matches incoming orders against resting liquidity under a configurable
//! priority discipline (strict time priority or pro-rata), and settles
//! resulting trades into per-account position and balance ledgers.
//!
//! **Key invariants:**
//! - All orders at a price level share one side
//! - Best bid < best ask whenever both exist (crossing orders match, never rest)
//! - Fill conservation: maker and taker decrease by exactly the trade amount
//! - Settlement never loses or double-counts value across a trade's two legs

pub mod book;
pub mod engine;
pub mod events;
pub mod exchange;
pub mod matching;
pub mod store;

pub use engine::{EngineConfig, MatchingEngine};
pub use exchange::ExchangeManager;
