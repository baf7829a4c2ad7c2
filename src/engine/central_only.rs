// ============================================================================
// Central-Only Clearing
// Baseline market without peer trading
// ============================================================================

use crate::domain::{CentralPrices, OrderBook, Trade, TradeLog};
use crate::engine::central::{absorb_open_sells, supply_remainder};
use crate::error::MarketResult;
use crate::interfaces::ClearingAlgorithm;
use rand::RngCore;

/// Every buyer is supplied by the central agent at its sell price and every
/// seller is absorbed at its buy price. Buyers are served in intake order;
/// there is nothing to be fair about.
#[derive(Debug, Default)]
pub struct CentralOnly;

impl CentralOnly {
    pub fn new() -> Self {
        Self
    }
}

impl ClearingAlgorithm for CentralOnly {
    fn match_orders(
        &self,
        book: &mut OrderBook,
        prices: &CentralPrices,
        _rng: &mut dyn RngCore,
    ) -> MarketResult<Vec<Trade>> {
        let mut log = TradeLog::new();
        let OrderBook { buys, sells, .. } = book;

        for buy in buys.iter_mut() {
            supply_remainder(buy, prices, &mut log)?;
        }
        absorb_open_sells(sells, prices, &mut log)?;

        Ok(log.into_trades())
    }

    fn name(&self) -> &str {
        "CentralOnly"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderId, ParticipantId, TradeKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;

    #[test]
    fn test_no_peer_trades_even_when_prices_cross() {
        let prices = CentralPrices::new(Decimal::new(7, 2), Decimal::new(24, 2));
        let mut book = OrderBook::new();
        book.submit(Order::sell(
            OrderId::new(0),
            ParticipantId::new(0),
            Decimal::from(3),
            Decimal::new(10, 2),
        ))
        .unwrap();
        book.submit(Order::buy(
            OrderId::new(1),
            ParticipantId::new(1),
            Decimal::from(3),
        ))
        .unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let trades = CentralOnly::new()
            .match_orders(&mut book, &prices, &mut rng)
            .unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].kind, TradeKind::CentralSupply);
        assert_eq!(trades[0].price, Decimal::new(24, 2));
        assert_eq!(trades[1].kind, TradeKind::CentralAbsorption);
        assert_eq!(trades[1].price, Decimal::new(7, 2));
        assert!(book.assert_cleared().is_ok());
    }
}
