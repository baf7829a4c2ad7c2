// ============================================================================
// Market Errors
// Error taxonomy for configuration, order intake and clearing invariants
// ============================================================================

use crate::domain::order::state::{OrderState, OrderStateTransition};
use crate::domain::{OrderId, ParticipantId};
use crate::numeric::NumericError;
use thiserror::Error;

/// Errors surfaced by the clearing engine and the simulation around it.
///
/// Configuration errors are raised before the first simulated day. Every
/// other variant aborts the day it occurs in: a day either clears correctly
/// in one pass or the run is invalid.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("order {order_id} rejected: {reason}")]
    OrderRejected { order_id: OrderId, reason: String },

    #[error("participant {0} already has an order for this day")]
    DuplicateOrder(ParticipantId),

    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),

    #[error("invalid order transition from {from:?} via {transition:?}")]
    InvalidTransition {
        from: OrderState,
        transition: OrderStateTransition,
    },

    #[error("clearing invariant violated: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Numeric(#[from] NumericError),

    #[error("result sink failed: {0}")]
    Sink(#[from] std::io::Error),
}

pub type MarketResult<T> = Result<T, MarketError>;
