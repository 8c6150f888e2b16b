//! Fixed-point price type for the [0, 1] probability grid
//!
//! Prices are stored as integer basis points to keep grid comparisons and
//! settlement arithmetic exact. All value arithmetic (price × amount) goes
//! through rust_decimal for deterministic results.

use crate::errors::BookError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Basis points per unit of probability: a price of 1.0 is `PRICE_SCALE` bps.
pub const PRICE_SCALE: u32 = 10_000;

/// A quantized price on the [0, 1] probability grid
///
/// Stored as basis points in `[0, PRICE_SCALE]`. Ordering follows the
/// numeric price, so `BTreeMap`/`BTreeSet` iteration is price-ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Probability zero; never a valid resting level.
    pub const ZERO: Price = Price(0);
    /// Probability one, the top of the grid.
    pub const MAX: Price = Price(PRICE_SCALE);

    /// Create a price from basis points
    ///
    /// # Panics
    /// Panics if `bps` exceeds the grid maximum.
    pub fn from_bps(bps: u32) -> Self {
        assert!(bps <= PRICE_SCALE, "price exceeds probability 1.0");
        Self(bps)
    }

    /// Convert a decimal probability into a grid price
    ///
    /// Fails unless the value is an exact basis-point multiple in [0, 1];
    /// submitted prices are never silently rounded.
    pub fn try_from_decimal(value: Decimal) -> Result<Self, BookError> {
        let scaled = value * Decimal::from(PRICE_SCALE);
        if scaled.fract() != Decimal::ZERO
            || scaled < Decimal::ZERO
            || scaled > Decimal::from(PRICE_SCALE)
        {
            return Err(BookError::InvalidPrice {
                price: value.to_string(),
            });
        }
        // Exact integer in [0, PRICE_SCALE], conversion cannot fail
        Ok(Self(scaled.trunc().mantissa() as u32))
    }

    /// Price in basis points
    pub fn as_bps(&self) -> u32 {
        self.0
    }

    /// Price as a decimal probability in [0, 1]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Check whether this price lies on a grid with the given tick (bps)
    pub fn is_on_grid(&self, tick_size: u32) -> bool {
        self.0 > 0 && self.0 <= PRICE_SCALE && self.0 % tick_size == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}
