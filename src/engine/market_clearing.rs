// ============================================================================
// Market Clearing Engine
// Runs one day: match, verify, settle, discover the feedback price
// ============================================================================

use crate::domain::{
    CentralAgent, CentralPrices, MarketConfig, OrderBook, OrderBookSnapshot, Trade, TradeKind,
};
use crate::engine::price_discovery::DaySummary;
use crate::engine::settlement::{self, SettlementTotals};
use crate::error::{MarketError, MarketResult};
use crate::interfaces::{ClearingAlgorithm, EventHandler, MarketEvent, MarketParticipant};
use rand::RngCore;
use std::sync::Arc;

/// Outcome of one cleared day
#[derive(Debug, Clone)]
pub struct ClearingReport {
    /// Trades in execution order
    pub trades: Vec<Trade>,
    pub summary: DaySummary,
    /// Book as submitted, before any fill
    pub snapshot: OrderBookSnapshot,
    pub settlement: SettlementTotals,
}

/// Daily clearing with a pluggable clearing algorithm
pub struct MarketClearingEngine {
    config: MarketConfig,

    /// Central tariffs, derived from `config`
    prices: CentralPrices,

    /// Pluggable clearing algorithm
    algorithm: Box<dyn ClearingAlgorithm>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

impl MarketClearingEngine {
    /// Create a new clearing engine
    pub fn new(
        config: MarketConfig,
        algorithm: Box<dyn ClearingAlgorithm>,
        event_handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            prices: config.central_prices(),
            config,
            algorithm,
            event_handler,
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn prices(&self) -> &CentralPrices {
        &self.prices
    }

    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    /// Clear one day's book.
    ///
    /// Orders from participants missing in `participants` are rejected
    /// before matching. Any invariant breach aborts the day before
    /// settlement, so no participant is touched and no aggregates are
    /// produced.
    pub fn clear_day<P: MarketParticipant>(
        &self,
        mut book: OrderBook,
        participants: &mut [P],
        central: &mut CentralAgent,
        rng: &mut dyn RngCore,
    ) -> MarketResult<ClearingReport> {
        if central.prices() != &self.prices {
            return Err(MarketError::InvalidConfig(format!(
                "central agent tariffs {:?} differ from market tariffs {:?}",
                central.prices(),
                self.prices
            )));
        }

        if let Some(order) = book
            .orders()
            .find(|o| !settlement::is_known(o.participant_id, &*participants))
        {
            return Err(MarketError::UnknownParticipant(order.participant_id));
        }

        let snapshot = book.snapshot();
        let mut events = Vec::with_capacity(book.len() * 3 + 1);

        // Event: Orders received
        for order in book.orders() {
            events.push(MarketEvent::OrderReceived {
                order_id: order.id,
                participant_id: order.participant_id,
                side: order.side,
                amount: order.quantity,
            });
        }

        let trades = self.algorithm.match_orders(&mut book, &self.prices, rng)?;

        book.assert_cleared()?;
        self.check_ceiling(&trades)?;

        // Event: Trades
        for trade in &trades {
            let trade = trade.clone();
            events.push(match trade.kind {
                TradeKind::Peer => MarketEvent::PeerMatched { trade },
                TradeKind::CentralSupply => MarketEvent::CentralSupplied { trade },
                TradeKind::CentralAbsorption => MarketEvent::CentralAbsorbed { trade },
            });
        }

        // Event: Orders filled
        for order in book.orders() {
            events.push(MarketEvent::OrderFilled {
                order_id: order.id,
                total_filled: order.filled(),
            });
        }

        let settlement = settlement::settle(&trades, participants, central)?;
        let summary = DaySummary::from_trades(&trades)?;

        events.push(MarketEvent::DayCleared {
            summary: summary.clone(),
        });
        self.event_handler.on_events(events);

        Ok(ClearingReport {
            trades,
            summary,
            snapshot,
            settlement,
        })
    }

    fn check_ceiling(&self, trades: &[Trade]) -> MarketResult<()> {
        let ceiling = self.prices.ceiling();
        if let Some(trade) = trades
            .iter()
            .find(|t| t.kind == TradeKind::Peer && t.price > ceiling)
        {
            return Err(MarketError::InvariantViolation(format!(
                "peer trade {} at {} above ceiling {}",
                trade.id, trade.price, ceiling
            )));
        }
        Ok(())
    }
}
