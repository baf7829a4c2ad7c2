// ============================================================================
// Pricing Policy Interface
// How a prosumer moves its posted sell price between days
// ============================================================================

use crate::numeric::{Energy, Price};
use rand::RngCore;

/// Inputs available to a prosumer when it reposts its sell price
#[derive(Debug, Clone, Copy)]
pub struct PricingInput {
    /// Price posted on the previous day
    pub current_price: Price,
    /// Price-adaptation gain
    pub sensitivity: Price,
    /// Today's production minus demand (signed)
    pub imbalance: Energy,
    /// Previous day's volume-weighted average trade price
    pub market_price: Price,
    /// Volume-weighted price the prosumer booked yesterday's sales at, if any.
    /// Sales are booked at the prosumer's ask, including absorbed remainders.
    pub realized_price: Option<Price>,
}

pub trait PricingPolicy: Send + Sync {
    /// Next posted sell price. Implementations never return a negative price.
    fn next_sell_price(&self, input: &PricingInput, rng: &mut dyn RngCore) -> Price;

    fn name(&self) -> &str;
}
