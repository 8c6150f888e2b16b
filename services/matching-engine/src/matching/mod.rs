//! Trade settlement
//!
//! Applies each trade's two legs to the participants' ledgers. The book and
//! the ledgers are updated in the same critical section, so a reader holding
//! the engine lock always sees them consistent.

pub mod settlement;

pub use settlement::{settle_trade, update_account};
