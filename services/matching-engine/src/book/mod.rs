//! Order book data structures
//!
//! The book for one market: a pre-allocated ladder of price levels, each
//! owning its resting orders.

pub mod orderbook;
pub mod price_level;

pub use orderbook::{BookEntry, Orderbook};
pub use price_level::{Discipline, PriceLevel};
