// ============================================================================
// Performance Pricing
// Posted price follows whether yesterday's own sales beat the market
// ============================================================================

use crate::interfaces::{PricingInput, PricingPolicy};
use crate::numeric::Price;
use rand::RngCore;
use rust_decimal::Decimal;

/// Raise the posted price by `sensitivity` when the prosumer's own
/// volume-weighted sale price beat the market average, lower it (not
/// below zero) otherwise. A prosumer that sold nothing keeps its price.
#[derive(Debug, Clone, Default)]
pub struct PerformancePricing;

impl PerformancePricing {
    pub fn new() -> Self {
        Self
    }
}

impl PricingPolicy for PerformancePricing {
    fn next_sell_price(&self, input: &PricingInput, _rng: &mut dyn RngCore) -> Price {
        match input.realized_price {
            Some(realized) if realized > input.market_price => {
                input.current_price + input.sensitivity
            }
            Some(_) => (input.current_price - input.sensitivity).max(Decimal::ZERO),
            None => input.current_price,
        }
    }

    fn name(&self) -> &str {
        "performance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input(current: i64, realized: Option<i64>) -> PricingInput {
        PricingInput {
            current_price: Decimal::new(current, 2),
            sensitivity: Decimal::new(2, 2),
            imbalance: Decimal::from(3),
            market_price: Decimal::new(12, 2),
            realized_price: realized.map(|c| Decimal::new(c, 2)),
        }
    }

    #[test]
    fn test_beating_market_raises_price() {
        let mut rng = StdRng::seed_from_u64(0);
        let price = PerformancePricing.next_sell_price(&input(15, Some(15)), &mut rng);
        assert_eq!(price, Decimal::new(17, 2));
    }

    #[test]
    fn test_matching_market_lowers_price() {
        let mut rng = StdRng::seed_from_u64(0);
        let price = PerformancePricing.next_sell_price(&input(15, Some(12)), &mut rng);
        assert_eq!(price, Decimal::new(13, 2));
    }

    #[test]
    fn test_floor_at_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        let price = PerformancePricing.next_sell_price(&input(1, Some(7)), &mut rng);
        assert_eq!(price, Decimal::ZERO);
    }

    #[test]
    fn test_no_sales_keeps_price() {
        let mut rng = StdRng::seed_from_u64(0);
        let price = PerformancePricing.next_sell_price(&input(15, None), &mut rng);
        assert_eq!(price, Decimal::new(15, 2));
    }
}
