// ============================================================================
// Event Handler Interface
// Defines the contract for observing order and trade events
// ============================================================================

use crate::domain::{OrderId, ParticipantId, Side, Trade};
use crate::engine::DaySummary;
use crate::numeric::Energy;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Events emitted while a day is cleared
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum MarketEvent {
    /// Order accepted into the day's book
    OrderReceived {
        order_id: OrderId,
        participant_id: ParticipantId,
        side: Side,
        amount: Energy,
    },

    /// Buyer matched against a peer seller
    PeerMatched { trade: Trade },

    /// Central agent supplied a buyer's remainder
    CentralSupplied { trade: Trade },

    /// Central agent absorbed a seller's remainder
    CentralAbsorbed { trade: Trade },

    /// Order fully filled
    OrderFilled { order_id: OrderId, total_filled: Energy },

    /// Settlement applied and feedback price computed
    DayCleared { summary: DaySummary },
}

/// Event handler trait for processing clearing events
/// Implementations can handle logging, auditing, test recording, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a market event
    fn on_event(&self, event: MarketEvent);

    /// Batch event handler
    fn on_events(&self, events: Vec<MarketEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: MarketEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: MarketEvent) {
        match &event {
            MarketEvent::DayCleared { summary } => tracing::debug!(
                volume = %summary.traded_volume,
                price = %summary.weighted_avg_price,
                trades = summary.trade_count,
                "day cleared"
            ),
            _ => tracing::trace!("Clearing event: {:?}", event),
        }
    }
}
