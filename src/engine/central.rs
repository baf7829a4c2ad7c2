// ============================================================================
// Central Agent Fallback
// Unlimited-capacity supply and absorption at fixed tariffs
// ============================================================================

use crate::domain::{CentralPrices, Order, Side, TradeLog};
use crate::error::{MarketError, MarketResult};

/// Supply whatever a buy order still needs at the central sell price.
pub(crate) fn supply_remainder(
    buy: &mut Order,
    prices: &CentralPrices,
    log: &mut TradeLog,
) -> MarketResult<()> {
    debug_assert_eq!(buy.side, Side::Buy);
    if buy.is_done() {
        return Ok(());
    }

    let remaining = buy.remaining();
    buy.fill(remaining)?;
    log.central_supply(buy.id, buy.participant_id, prices.sell_price, remaining);
    Ok(())
}

/// Absorb every open sell remainder at the central buy price.
///
/// The trade keeps the sell order's ask; that is the price the seller
/// books the sale at for its next-day price update.
pub(crate) fn absorb_open_sells(
    sells: &mut [Order],
    prices: &CentralPrices,
    log: &mut TradeLog,
) -> MarketResult<()> {
    for sell in sells.iter_mut().filter(|o| !o.is_done()) {
        if sell.side != Side::Sell {
            return Err(MarketError::InvariantViolation(format!(
                "buy order {} found among sells",
                sell.id
            )));
        }

        let remaining = sell.remaining();
        sell.fill(remaining)?;
        log.central_absorption(
            sell.id,
            sell.participant_id,
            sell.ask(),
            prices.buy_price,
            remaining,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderId, ParticipantId, TradeKind};
    use rust_decimal::Decimal;

    fn prices() -> CentralPrices {
        CentralPrices::new(Decimal::new(7, 2), Decimal::new(24, 2))
    }

    #[test]
    fn test_supply_fills_remainder() {
        let mut log = TradeLog::new();
        let mut buy = Order::buy(OrderId::new(0), ParticipantId::new(0), Decimal::from(5));
        buy.fill(Decimal::from(2)).unwrap();

        supply_remainder(&mut buy, &prices(), &mut log).unwrap();

        assert!(buy.is_done());
        let trades = log.into_trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].kind, TradeKind::CentralSupply);
        assert_eq!(trades[0].amount, Decimal::from(3));
        assert_eq!(trades[0].price, Decimal::new(24, 2));
    }

    #[test]
    fn test_supply_skips_done_order() {
        let mut log = TradeLog::new();
        let mut buy = Order::buy(OrderId::new(0), ParticipantId::new(0), Decimal::ONE);
        buy.fill(Decimal::ONE).unwrap();

        supply_remainder(&mut buy, &prices(), &mut log).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_absorb_only_open_sells() {
        let mut log = TradeLog::new();
        let mut sells = vec![
            Order::sell(
                OrderId::new(0),
                ParticipantId::new(0),
                Decimal::from(2),
                Decimal::new(10, 2),
            ),
            Order::sell(
                OrderId::new(1),
                ParticipantId::new(1),
                Decimal::from(4),
                Decimal::new(30, 2),
            ),
        ];
        sells[0].fill(Decimal::from(2)).unwrap();

        absorb_open_sells(&mut sells, &prices(), &mut log).unwrap();

        assert!(sells.iter().all(Order::is_done));
        let trades = log.into_trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].seller, ParticipantId::new(1));
        assert_eq!(trades[0].price, Decimal::new(7, 2));
        assert_eq!(trades[0].seller_ask, Some(Decimal::new(30, 2)));
    }
}
