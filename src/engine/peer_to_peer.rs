// ============================================================================
// Peer-to-Peer Double Auction
// Cheapest-first peer matching with a price-capped central fallback
// ============================================================================

use crate::domain::{CentralPrices, OrderBook, Trade, TradeLog};
use crate::engine::central::{absorb_open_sells, supply_remainder};
use crate::error::MarketResult;
use crate::interfaces::ClearingAlgorithm;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Peer-to-peer double auction
///
/// Sells are ranked by ask, cheapest first. Buyers are processed in a
/// random order; each buyer walks the ranked sells and takes energy at the
/// seller's ask until covered. Asks above the central sell price are never
/// matched peer-to-peer. Whatever a buyer still needs afterwards comes from
/// the central agent at its sell price, and every sell remainder left once
/// all buyers are done is absorbed by the central agent at its buy price.
///
/// # Example
/// ```text
/// Sells:  S1 2 kWh @ 0.10, S2 4 kWh @ 0.15     central 0.07 / 0.24
/// Buy:    B  5 kWh
/// Result: B takes 2 from S1 @ 0.10, 3 from S2 @ 0.15;
///         1 kWh of S2 absorbed by central @ 0.07
/// ```
#[derive(Debug, Default)]
pub struct PeerToPeer;

impl PeerToPeer {
    pub fn new() -> Self {
        Self
    }
}

impl ClearingAlgorithm for PeerToPeer {
    fn match_orders(
        &self,
        book: &mut OrderBook,
        prices: &CentralPrices,
        rng: &mut dyn RngCore,
    ) -> MarketResult<Vec<Trade>> {
        let mut log = TradeLog::new();
        let ceiling = prices.ceiling();

        book.sort_sells_by_price();

        let OrderBook { buys, sells, .. } = book;

        // Random buyer sequence: no buyer is favoured by intake order
        let mut sequence: Vec<usize> = (0..buys.len()).collect();
        sequence.shuffle(rng);

        for &bi in &sequence {
            let buy = &mut buys[bi];

            for sell in sells.iter_mut() {
                if buy.is_done() {
                    break;
                }
                if sell.is_done() {
                    continue;
                }

                let ask = sell.ask();
                // Sorted ascending: every later ask is above the ceiling too
                if ask > ceiling {
                    break;
                }

                let amount = buy.remaining().min(sell.remaining());
                sell.fill(amount)?;
                buy.fill(amount)?;
                log.peer(
                    buy.id,
                    buy.participant_id,
                    sell.id,
                    sell.participant_id,
                    ask,
                    amount,
                );
            }

            supply_remainder(buy, prices, &mut log)?;
        }

        absorb_open_sells(sells, prices, &mut log)?;

        Ok(log.into_trades())
    }

    fn name(&self) -> &str {
        "PeerToPeer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, OrderId, ParticipantId, TradeKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal::Decimal;

    fn prices() -> CentralPrices {
        CentralPrices::new(Decimal::new(7, 2), Decimal::new(24, 2))
    }

    fn sell(id: u64, participant: u32, amount: i64, cents: i64) -> Order {
        Order::sell(
            OrderId::new(id),
            ParticipantId::new(participant),
            Decimal::from(amount),
            Decimal::new(cents, 2),
        )
    }

    fn buy(id: u64, participant: u32, amount: i64) -> Order {
        Order::buy(
            OrderId::new(id),
            ParticipantId::new(participant),
            Decimal::from(amount),
        )
    }

    #[test]
    fn test_cheapest_first_with_partial_fill() {
        let mut book = OrderBook::new();
        // Intake order is deliberately not price order
        book.submit(sell(0, 1, 4, 15)).unwrap();
        book.submit(sell(1, 2, 2, 10)).unwrap();
        book.submit(buy(2, 0, 5)).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let trades = PeerToPeer::new()
            .match_orders(&mut book, &prices(), &mut rng)
            .unwrap();

        assert_eq!(trades.len(), 3);

        assert_eq!(trades[0].kind, TradeKind::Peer);
        assert_eq!(trades[0].seller, ParticipantId::new(2));
        assert_eq!(trades[0].amount, Decimal::from(2));
        assert_eq!(trades[0].price, Decimal::new(10, 2));

        assert_eq!(trades[1].kind, TradeKind::Peer);
        assert_eq!(trades[1].seller, ParticipantId::new(1));
        assert_eq!(trades[1].amount, Decimal::from(3));
        assert_eq!(trades[1].price, Decimal::new(15, 2));

        assert_eq!(trades[2].kind, TradeKind::CentralAbsorption);
        assert_eq!(trades[2].seller, ParticipantId::new(1));
        assert_eq!(trades[2].amount, Decimal::ONE);
        assert_eq!(trades[2].price, Decimal::new(7, 2));

        assert!(book.assert_cleared().is_ok());
    }

    #[test]
    fn test_ask_above_ceiling_is_never_matched() {
        let mut book = OrderBook::new();
        book.submit(sell(0, 1, 10, 30)).unwrap();
        book.submit(buy(1, 0, 4)).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let trades = PeerToPeer::new()
            .match_orders(&mut book, &prices(), &mut rng)
            .unwrap();

        assert!(trades.iter().all(|t| t.kind != TradeKind::Peer));
        let supply = trades
            .iter()
            .find(|t| t.kind == TradeKind::CentralSupply)
            .unwrap();
        assert_eq!(supply.amount, Decimal::from(4));
        assert_eq!(supply.price, Decimal::new(24, 2));

        let absorbed = trades
            .iter()
            .find(|t| t.kind == TradeKind::CentralAbsorption)
            .unwrap();
        assert_eq!(absorbed.amount, Decimal::from(10));
        assert_eq!(absorbed.price, Decimal::new(7, 2));
    }

    #[test]
    fn test_ask_at_ceiling_is_eligible() {
        let mut book = OrderBook::new();
        book.submit(sell(0, 1, 3, 24)).unwrap();
        book.submit(buy(1, 0, 3)).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let trades = PeerToPeer::new()
            .match_orders(&mut book, &prices(), &mut rng)
            .unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].kind, TradeKind::Peer);
    }

    #[test]
    fn test_exact_match_completes_both_orders() {
        let mut book = OrderBook::new();
        book.submit(sell(0, 1, 5, 12)).unwrap();
        book.submit(buy(1, 0, 5)).unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let trades = PeerToPeer::new()
            .match_orders(&mut book, &prices(), &mut rng)
            .unwrap();

        assert_eq!(trades.len(), 1);
        assert!(book.sells()[0].is_done());
        assert!(book.buys()[0].is_done());
    }

    #[test]
    fn test_same_seed_same_matches() {
        let build = || {
            let mut book = OrderBook::new();
            book.submit(sell(0, 10, 3, 12)).unwrap();
            book.submit(sell(1, 11, 1, 9)).unwrap();
            for (i, amount) in [2, 1, 4, 2, 3].iter().enumerate() {
                book.submit(buy(2 + i as u64, i as u32, *amount)).unwrap();
            }
            book
        };

        let mut a = build();
        let mut b = build();
        let trades_a = PeerToPeer::new()
            .match_orders(&mut a, &prices(), &mut StdRng::seed_from_u64(42))
            .unwrap();
        let trades_b = PeerToPeer::new()
            .match_orders(&mut b, &prices(), &mut StdRng::seed_from_u64(42))
            .unwrap();

        assert_eq!(trades_a, trades_b);
    }

    #[test]
    fn test_no_buyers_everything_absorbed() {
        let mut book = OrderBook::new();
        book.submit(sell(0, 0, 10, 20)).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let trades = PeerToPeer::new()
            .match_orders(&mut book, &prices(), &mut rng)
            .unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].kind, TradeKind::CentralAbsorption);
        assert_eq!(trades[0].amount, Decimal::from(10));
    }
}
