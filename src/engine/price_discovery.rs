// ============================================================================
// Price Discovery
// Volume-weighted day price fed back into next-day pricing
// ============================================================================

use crate::domain::{Trade, TradeKind};
use crate::numeric::{Energy, Money, NumericError, NumericResult, Price};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Σ(price × amount) / Σ(amount) over every trade of the day, peer and
/// central alike. Zero when nothing traded.
pub fn weighted_average_price(trades: &[Trade]) -> NumericResult<Price> {
    let mut volume = Decimal::ZERO;
    let mut value = Decimal::ZERO;

    for trade in trades {
        volume = volume
            .checked_add(trade.amount)
            .ok_or(NumericError::Overflow)?;
        value = value
            .checked_add(trade.notional()?)
            .ok_or(NumericError::Overflow)?;
    }

    if volume.is_zero() {
        return Ok(Decimal::ZERO);
    }
    value.checked_div(volume).ok_or(NumericError::DivisionByZero)
}

/// Day-level aggregates of one clearing pass
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DaySummary {
    /// All energy that changed hands, peer and central
    pub traded_volume: Energy,
    /// Energy matched between prosumers
    pub peer_volume: Energy,
    /// Energy the central agent supplied to buyers
    pub central_supplied: Energy,
    /// Energy the central agent absorbed from sellers
    pub central_absorbed: Energy,
    /// Σ(price × amount) over every trade
    pub traded_value: Money,
    /// Feedback price for the next day
    pub weighted_avg_price: Price,
    pub trade_count: usize,
}

impl DaySummary {
    pub fn from_trades(trades: &[Trade]) -> NumericResult<Self> {
        let mut summary = DaySummary {
            trade_count: trades.len(),
            ..DaySummary::default()
        };

        for trade in trades {
            summary.traded_volume += trade.amount;
            summary.traded_value = summary
                .traded_value
                .checked_add(trade.notional()?)
                .ok_or(NumericError::Overflow)?;

            match trade.kind {
                TradeKind::Peer => summary.peer_volume += trade.amount,
                TradeKind::CentralSupply => summary.central_supplied += trade.amount,
                TradeKind::CentralAbsorption => summary.central_absorbed += trade.amount,
            }
        }

        summary.weighted_avg_price = weighted_average_price(trades)?;
        Ok(summary)
    }

    /// Share of traded volume matched peer-to-peer
    pub fn peer_share(&self) -> f64 {
        if self.traded_volume.is_zero() {
            return 0.0;
        }
        crate::numeric::to_f64(self.peer_volume / self.traded_volume)
    }
}
