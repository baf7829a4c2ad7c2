// ============================================================================
// Settlement
// Applies the day's trades to participant energy and money
// ============================================================================

use crate::domain::{CentralAgent, ParticipantId, Trade};
use crate::error::{MarketError, MarketResult};
use crate::interfaces::MarketParticipant;
use crate::numeric::{Energy, Money};
use rust_decimal::Decimal;

/// What moved during one settlement pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementTotals {
    /// Energy moved from sellers to buyers
    pub energy: Energy,
    /// Money moved from buyers to sellers
    pub money: Money,
    pub trades: usize,
}

/// Settle every trade in order.
///
/// Per trade: the buyer pays `amount × price` and receives `amount`; the
/// seller is paid the same and delivers `amount`; sellers remember the
/// sale at their ask for next-day pricing. Prosumer ids index
/// `participants`; the central agent is addressed by
/// [`ParticipantId::CENTRAL`].
///
/// Every trade is checked before the first transfer, so an error leaves
/// all participants untouched.
pub fn settle<P: MarketParticipant>(
    trades: &[Trade],
    participants: &mut [P],
    central: &mut CentralAgent,
) -> MarketResult<SettlementTotals> {
    let notionals = trades
        .iter()
        .map(|trade| check(trade, &*participants))
        .collect::<MarketResult<Vec<Money>>>()?;

    let mut totals = SettlementTotals::default();

    for (trade, notional) in trades.iter().zip(notionals) {
        let buyer = resolve(trade.buyer, participants, central)?;
        buyer.credit(-notional);
        buyer.receive_energy(trade.amount);

        let seller = resolve(trade.seller, participants, central)?;
        seller.credit(notional);
        seller.receive_energy(-trade.amount);
        seller.record_sale(trade.amount, trade.seller_ask.unwrap_or(trade.price));

        totals.energy += trade.amount;
        totals.money += notional;
        totals.trades += 1;
    }

    Ok(totals)
}

/// Validate one trade against the population and return its notional.
fn check<P: MarketParticipant>(trade: &Trade, participants: &[P]) -> MarketResult<Money> {
    if trade.amount <= Decimal::ZERO {
        return Err(MarketError::InvariantViolation(format!(
            "trade {} has non-positive amount {}",
            trade.id, trade.amount
        )));
    }
    if trade.buyer == trade.seller {
        return Err(MarketError::InvariantViolation(format!(
            "trade {} has {} on both sides",
            trade.id, trade.buyer
        )));
    }

    for id in [trade.buyer, trade.seller] {
        if !is_known(id, participants) {
            return Err(MarketError::UnknownParticipant(id));
        }
    }

    Ok(trade.notional()?)
}

/// Whether `id` is the central agent or a prosumer present in `participants`
pub(crate) fn is_known<P: MarketParticipant>(id: ParticipantId, participants: &[P]) -> bool {
    id.is_central()
        || participants
            .get(id.index())
            .is_some_and(|participant| participant.id() == id)
}

fn resolve<'a, P: MarketParticipant>(
    id: ParticipantId,
    participants: &'a mut [P],
    central: &'a mut CentralAgent,
) -> MarketResult<&'a mut dyn MarketParticipant> {
    if id.is_central() {
        return Ok(central);
    }

    match participants.get_mut(id.index()) {
        Some(participant) if participant.id() == id => Ok(participant),
        _ => Err(MarketError::UnknownParticipant(id)),
    }
}
