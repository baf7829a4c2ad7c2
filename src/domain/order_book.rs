// ============================================================================
// Order Book Domain Model
// Per-day arena of buy and sell orders
// ============================================================================

use crate::error::{MarketError, MarketResult};
use crate::interfaces::MarketParticipant;
use crate::numeric::{Energy, Price};
use rust_decimal::Decimal;
use std::collections::HashSet;

use super::{Order, OrderId, ParticipantId, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Book
// ============================================================================

/// The day's orders, split by side.
///
/// Orders live here by value for the duration of one clearing pass and are
/// addressed by position; nothing in the book outlives the day.
#[derive(Debug, Default)]
pub struct OrderBook {
    pub(crate) buys: Vec<Order>,
    pub(crate) sells: Vec<Order>,
    participants: HashSet<ParticipantId>,
    next_order_id: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the day's orders from every participant, at most one each.
    pub fn collect<P: MarketParticipant>(participants: &[P]) -> MarketResult<Self> {
        let mut book = Self::new();
        for participant in participants {
            if let Some(order) = participant.create_order(book.next_id()) {
                book.submit(order)?;
            }
        }
        Ok(book)
    }

    /// Id the next submitted order should carry
    pub fn next_id(&self) -> OrderId {
        OrderId::new(self.next_order_id)
    }

    /// Add an order to the book.
    ///
    /// Order ids must be strictly increasing across accepted orders, so
    /// every trade refers to exactly one order per side.
    pub fn submit(&mut self, order: Order) -> MarketResult<()> {
        if let Err(reason) = order.validate() {
            return Err(MarketError::OrderRejected {
                order_id: order.id,
                reason,
            });
        }

        if order.participant_id.is_central() {
            return Err(MarketError::OrderRejected {
                order_id: order.id,
                reason: "Central agent does not post peer orders".to_string(),
            });
        }

        if order.id.sequence() < self.next_order_id {
            return Err(MarketError::OrderRejected {
                order_id: order.id,
                reason: format!(
                    "Order id must follow {}",
                    OrderId::new(self.next_order_id - 1)
                ),
            });
        }

        if !self.participants.insert(order.participant_id) {
            return Err(MarketError::DuplicateOrder(order.participant_id));
        }

        self.next_order_id = order.id.sequence().saturating_add(1);

        match order.side {
            Side::Buy => self.buys.push(order),
            Side::Sell => self.sells.push(order),
        }
        Ok(())
    }

    /// Sort sells cheapest first. Stable, so equal asks keep intake order.
    pub fn sort_sells_by_price(&mut self) {
        self.sells.sort_by(|a, b| a.ask().cmp(&b.ask()));
    }

    pub fn buys(&self) -> &[Order] {
        &self.buys
    }

    pub fn sells(&self) -> &[Order] {
        &self.sells
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.buys.iter().chain(self.sells.iter())
    }

    pub fn len(&self) -> usize {
        self.buys.len() + self.sells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }

    /// Lowest ask among sells still open
    pub fn best_ask(&self) -> Option<Price> {
        self.sells
            .iter()
            .filter(|o| !o.is_done())
            .map(Order::ask)
            .min()
    }

    pub fn snapshot(&self) -> OrderBookSnapshot {
        OrderBookSnapshot {
            buy_orders: self.buys.len(),
            sell_orders: self.sells.len(),
            buy_volume: self.buys.iter().map(Order::remaining).sum(),
            sell_volume: self.sells.iter().map(Order::remaining).sum(),
            best_ask: self.best_ask(),
        }
    }

    /// Post-condition of every clearing pass: no order is left open.
    pub fn assert_cleared(&self) -> MarketResult<()> {
        if let Some(order) = self.orders().find(|o| !o.is_done()) {
            return Err(MarketError::InvariantViolation(format!(
                "{:?} order {} of {} still open with {} kWh remaining",
                order.side,
                order.id,
                order.participant_id,
                order.remaining()
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Order Book Snapshot
// ============================================================================

/// Aggregate view of the book before (or after) clearing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderBookSnapshot {
    pub buy_orders: usize,
    pub sell_orders: usize,
    pub buy_volume: Energy,
    pub sell_volume: Energy,
    pub best_ask: Option<Price>,
}

impl OrderBookSnapshot {
    /// Surplus (positive) or deficit (negative) of peer supply over demand
    pub fn net_supply(&self) -> Energy {
        self.sell_volume - self.buy_volume
    }

    pub fn is_balanced(&self) -> bool {
        self.net_supply() == Decimal::ZERO
    }
}
