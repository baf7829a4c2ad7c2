// ============================================================================
// Pricing Module
// Sell-price adaptation policies
// ============================================================================

mod imbalance;
mod performance;

pub use imbalance::ImbalancePricing;
pub use performance::PerformancePricing;

use crate::interfaces::PricingPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which pricing policy prosumers follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PricingKind {
    /// Track the market average, marked up by imbalance
    #[default]
    Imbalance,

    /// Step up or down depending on yesterday's realised price
    Performance,
}

impl PricingKind {
    /// Build the policy; `noise` only applies to imbalance pricing
    pub fn build(self, noise: f64) -> Box<dyn PricingPolicy> {
        match self {
            PricingKind::Imbalance => Box::new(ImbalancePricing::new(noise)),
            PricingKind::Performance => Box::new(PerformancePricing::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_by_kind() {
        assert_eq!(PricingKind::Imbalance.build(0.0).name(), "imbalance");
        assert_eq!(PricingKind::Performance.build(0.0).name(), "performance");
        assert_eq!(PricingKind::default(), PricingKind::Imbalance);
    }
}
