// ============================================================================
// Order Domain Model
// ============================================================================

use crate::error::{MarketError, MarketResult};
use crate::numeric::{Energy, Price};
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Position of an order in the day's intake sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(u64);

impl OrderId {
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub const fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Participant identifier. Prosumer ids are dense indices into the
/// population; the central agent uses a reserved id outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticipantId(u32);

impl ParticipantId {
    pub const CENTRAL: Self = Self(u32::MAX);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn is_central(&self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_central() {
            write!(f, "central")
        } else {
            write!(f, "P{}", self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

// ============================================================================
// Order State Machine
// ============================================================================

pub mod state {
    use crate::error::{MarketError, MarketResult};

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    /// An order is open until its remaining amount reaches zero, then done.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum OrderState {
        Open,
        Done,
    }

    impl OrderState {
        pub fn is_terminal(&self) -> bool {
            matches!(self, OrderState::Done)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum OrderStateTransition {
        /// Part of the remaining amount was settled
        PartialFill,
        /// The remaining amount was settled in full
        Fill,
    }

    impl OrderState {
        pub fn transition(&self, transition: OrderStateTransition) -> MarketResult<OrderState> {
            match (self, transition) {
                (OrderState::Open, OrderStateTransition::PartialFill) => Ok(OrderState::Open),
                (OrderState::Open, OrderStateTransition::Fill) => Ok(OrderState::Done),
                (OrderState::Done, _) => Err(MarketError::InvalidTransition {
                    from: *self,
                    transition,
                }),
            }
        }
    }
}

use state::{OrderState, OrderStateTransition};

// ============================================================================
// Order Entity
// ============================================================================

/// A one-day energy intent.
///
/// Sell orders carry the seller's posted price. Buy orders carry no price:
/// they take whatever clears them, a peer ask under the central ceiling or
/// the central sell price itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub id: OrderId,
    pub participant_id: ParticipantId,
    pub side: Side,
    pub price: Option<Price>,
    /// Amount at submission
    pub quantity: Energy,
    remaining: Energy,
    state: OrderState,
}

impl Order {
    pub fn buy(id: OrderId, participant_id: ParticipantId, quantity: Energy) -> Self {
        Self {
            id,
            participant_id,
            side: Side::Buy,
            price: None,
            quantity,
            remaining: quantity,
            state: OrderState::Open,
        }
    }

    pub fn sell(id: OrderId, participant_id: ParticipantId, quantity: Energy, price: Price) -> Self {
        Self {
            id,
            participant_id,
            side: Side::Sell,
            price: Some(price),
            quantity,
            remaining: quantity,
            state: OrderState::Open,
        }
    }

    pub fn remaining(&self) -> Energy {
        self.remaining
    }

    pub fn filled(&self) -> Energy {
        self.quantity - self.remaining
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.is_terminal()
    }

    /// Asking price of a sell order; zero for buy orders.
    pub fn ask(&self) -> Price {
        self.price.unwrap_or(Decimal::ZERO)
    }

    /// Settle `quantity` of the remaining amount.
    ///
    /// The order moves to `Done` exactly when the remaining amount reaches
    /// zero. Filling a done order, over-filling, or filling a non-positive
    /// amount is an invariant violation.
    pub fn fill(&mut self, quantity: Energy) -> MarketResult<()> {
        if quantity <= Decimal::ZERO {
            return Err(MarketError::InvariantViolation(format!(
                "order {} filled with non-positive amount {}",
                self.id, quantity
            )));
        }

        if quantity > self.remaining {
            return Err(MarketError::InvariantViolation(format!(
                "order {} over-filled: {} requested, {} remaining",
                self.id, quantity, self.remaining
            )));
        }

        let new_remaining = self.remaining - quantity;
        let transition = if new_remaining.is_zero() {
            OrderStateTransition::Fill
        } else {
            OrderStateTransition::PartialFill
        };

        self.state = self.state.transition(transition)?;
        self.remaining = new_remaining;
        Ok(())
    }

    /// Check the intake rules: positive amount, priced sells with a
    /// non-negative price, unpriced buys.
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity <= Decimal::ZERO {
            return Err("Amount must be positive".to_string());
        }

        match (self.side, self.price) {
            (Side::Sell, None) => Err("Sell orders must carry a price".to_string()),
            (Side::Sell, Some(price)) if price < Decimal::ZERO => {
                Err("Sell price cannot be negative".to_string())
            },
            (Side::Buy, Some(_)) => Err("Buy orders take the clearing price".to_string()),
            _ => Ok(()),
        }
    }
}
