//! Price level: all live orders at one quantized price
//!
//! A level owns its orders in admission order. Under time priority the front
//! of the queue is the next order consumed; under pro-rata the level only
//! exposes its aggregate and the full order set, and matching allocates
//! proportionally.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use types::errors::BookError;
use types::ids::OrderId;
use types::numeric::Price;
use types::order::{Order, Side};

/// Queue priority discipline, fixed per orderbook at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Strict time priority: earliest-admitted order is consumed first
    Fifo,
    /// Incoming quantity is split across all resting orders by size
    ProRata,
}

/// A price level containing the orders resting at one grid price
///
/// Admission order is the queue order; the engine only ever admits through
/// the orderbook, which assigns monotonically increasing positions, so FIFO
/// tie-breaks are well-defined.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    discipline: Discipline,
    orders: VecDeque<Order>,
}

impl PriceLevel {
    pub fn new(price: Price, discipline: Discipline) -> Self {
        Self {
            price,
            discipline,
            orders: VecDeque::new(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// The resident side, or `None` iff the level is empty
    ///
    /// Derived from the resting orders, so removing the last order makes the
    /// level tradable for either side again without explicit bookkeeping.
    pub fn side(&self) -> Option<Side> {
        self.orders.front().map(|order| order.side)
    }

    /// Insert a resting order at the back of the queue
    ///
    /// Fails if the level already holds orders of the opposite side.
    pub fn add(&mut self, order: Order) -> Result<(), BookError> {
        debug_assert_eq!(order.price, self.price, "order admitted to wrong level");
        if let Some(resident) = self.side() {
            if resident != order.side {
                return Err(BookError::SideMismatch {
                    price: self.price,
                    resident,
                    incoming: order.side,
                });
            }
        }
        self.orders.push_back(order);
        Ok(())
    }

    /// Remove an order by id, returning it
    pub fn remove(&mut self, order_id: &OrderId) -> Result<Order, BookError> {
        let position = self
            .orders
            .iter()
            .position(|order| &order.id == order_id);
        position
            .and_then(|index| self.orders.remove(index))
            .ok_or(BookError::OrderNotFound {
                order_id: *order_id,
                price: self.price,
            })
    }

    /// The earliest-admitted live order (time priority)
    ///
    /// Pro-rata levels expose no first order: matching against them is
    /// aggregate-only.
    pub fn first_order(&self) -> Option<&Order> {
        match self.discipline {
            Discipline::Fifo => self.orders.front(),
            Discipline::ProRata => None,
        }
    }

    pub(crate) fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    pub(crate) fn order_mut(&mut self, order_id: &OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|order| &order.id == order_id)
    }

    /// Sum of remaining amounts of all resting orders
    pub fn total_amount(&self) -> Decimal {
        self.orders.iter().map(|order| order.remaining).sum()
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    pub fn order_ids(&self) -> Vec<OrderId> {
        self.orders.iter().map(|order| order.id).collect()
    }

    pub fn num_orders(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
