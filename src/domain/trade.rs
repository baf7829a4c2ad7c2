// ============================================================================
// Trade Domain Model
// ============================================================================

use crate::numeric::{Energy, Money, NumericError, NumericResult, Price};
use std::fmt;

use super::{OrderId, ParticipantId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeId(u64);

impl TradeId {
    pub const fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// How a trade came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TradeKind {
    /// Buyer matched a peer seller at the seller's ask
    Peer,
    /// Central agent supplied a buyer's remainder at its sell price
    CentralSupply,
    /// Central agent absorbed a seller's remainder at its buy price
    CentralAbsorption,
}

impl TradeKind {
    pub fn is_central(&self) -> bool {
        !matches!(self, TradeKind::Peer)
    }
}

/// A settled transfer of energy from `seller` to `buyer` at `price`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    pub id: TradeId,
    pub kind: TradeKind,

    /// Buy order that took the energy (None for central absorption)
    pub buy_order_id: Option<OrderId>,

    /// Sell order that delivered the energy (None for central supply)
    pub sell_order_id: Option<OrderId>,

    pub buyer: ParticipantId,
    pub seller: ParticipantId,

    /// Execution price
    pub price: Price,

    /// Energy transferred
    pub amount: Energy,

    /// Ask of the sell order (None for central supply). Sellers book the
    /// sale at their ask, so an absorbed remainder counts at the posted
    /// price rather than the central buy price.
    pub seller_ask: Option<Price>,
}

impl Trade {
    /// Calculate the notional value of the trade (price * amount)
    ///
    /// Returns a Result because multiplication can overflow.
    pub fn notional(&self) -> NumericResult<Money> {
        self.price
            .checked_mul(self.amount)
            .ok_or(NumericError::Overflow)
    }
}

// ============================================================================
// Trade Log
// ============================================================================

/// Append-only list of the day's trades; assigns trade ids in order.
#[derive(Debug, Default)]
pub struct TradeLog {
    trades: Vec<Trade>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peer(
        &mut self,
        buy_order_id: OrderId,
        buyer: ParticipantId,
        sell_order_id: OrderId,
        seller: ParticipantId,
        price: Price,
        amount: Energy,
    ) -> &Trade {
        self.push(
            TradeKind::Peer,
            Some(buy_order_id),
            Some(sell_order_id),
            buyer,
            seller,
            price,
            amount,
            Some(price),
        )
    }

    pub fn central_supply(
        &mut self,
        buy_order_id: OrderId,
        buyer: ParticipantId,
        price: Price,
        amount: Energy,
    ) -> &Trade {
        self.push(
            TradeKind::CentralSupply,
            Some(buy_order_id),
            None,
            buyer,
            ParticipantId::CENTRAL,
            price,
            amount,
            None,
        )
    }

    pub fn central_absorption(
        &mut self,
        sell_order_id: OrderId,
        seller: ParticipantId,
        ask: Price,
        price: Price,
        amount: Energy,
    ) -> &Trade {
        self.push(
            TradeKind::CentralAbsorption,
            None,
            Some(sell_order_id),
            ParticipantId::CENTRAL,
            seller,
            price,
            amount,
            Some(ask),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        kind: TradeKind,
        buy_order_id: Option<OrderId>,
        sell_order_id: Option<OrderId>,
        buyer: ParticipantId,
        seller: ParticipantId,
        price: Price,
        amount: Energy,
        seller_ask: Option<Price>,
    ) -> &Trade {
        let id = TradeId(self.trades.len() as u64);
        self.trades.push(Trade {
            id,
            kind,
            buy_order_id,
            sell_order_id,
            buyer,
            seller,
            price,
            amount,
            seller_ask,
        });
        &self.trades[self.trades.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn into_trades(self) -> Vec<Trade> {
        self.trades
    }
}
