// ============================================================================
// Imbalance Pricing
// Posted price tracks the market and rises with the prosumer's imbalance
// ============================================================================

use crate::interfaces::{PricingInput, PricingPolicy};
use crate::numeric::{price_from_f64, Price, PRICE_DECIMALS};
use rand::{Rng, RngCore};
use rust_decimal::Decimal;

/// `sensitivity × |imbalance| + market price + U(−noise, noise)`, floored at 0.
///
/// Memoryless: yesterday's posted price and realised sales play no part.
#[derive(Debug, Clone)]
pub struct ImbalancePricing {
    noise: f64,
}

impl ImbalancePricing {
    pub fn new(noise: f64) -> Self {
        Self {
            noise: noise.abs(),
        }
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    fn sample_noise(&self, rng: &mut dyn RngCore) -> Price {
        if self.noise == 0.0 {
            return Decimal::ZERO;
        }
        price_from_f64(rng.gen_range(-self.noise..=self.noise)).unwrap_or(Decimal::ZERO)
    }
}

impl Default for ImbalancePricing {
    fn default() -> Self {
        Self::new(0.005)
    }
}

impl PricingPolicy for ImbalancePricing {
    fn next_sell_price(&self, input: &PricingInput, rng: &mut dyn RngCore) -> Price {
        let premium = input.sensitivity * input.imbalance.abs();
        let price = premium + input.market_price + self.sample_noise(rng);
        price.round_dp(PRICE_DECIMALS).max(Decimal::ZERO)
    }

    fn name(&self) -> &str {
        "imbalance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input(imbalance: i64, market_cents: i64) -> PricingInput {
        PricingInput {
            current_price: Decimal::new(50, 2),
            sensitivity: Decimal::new(1, 2),
            imbalance: Decimal::from(imbalance),
            market_price: Decimal::new(market_cents, 2),
            realized_price: None,
        }
    }

    #[test]
    fn test_noiseless_price_is_exact() {
        let policy = ImbalancePricing::new(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        // 0.01 × 4 + 0.12
        let price = policy.next_sell_price(&input(4, 12), &mut rng);
        assert_eq!(price, Decimal::new(16, 2));
    }

    #[test]
    fn test_deficit_counts_by_magnitude() {
        let policy = ImbalancePricing::new(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let surplus = policy.next_sell_price(&input(3, 10), &mut rng);
        let deficit = policy.next_sell_price(&input(-3, 10), &mut rng);
        assert_eq!(surplus, deficit);
    }

    #[test]
    fn test_noise_stays_in_band() {
        let policy = ImbalancePricing::new(0.005);
        let mut rng = StdRng::seed_from_u64(99);
        let centre = Decimal::new(13, 2);
        let band = Decimal::new(5, 3);
        for _ in 0..500 {
            let price = policy.next_sell_price(&input(1, 12), &mut rng);
            assert!((price - centre).abs() <= band);
        }
    }

    #[test]
    fn test_price_never_negative() {
        let policy = ImbalancePricing::new(0.5);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            assert!(policy.next_sell_price(&input(0, 0), &mut rng) >= Decimal::ZERO);
        }
    }
}
