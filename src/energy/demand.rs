// ============================================================================
// Seasonal Demand
// ============================================================================

use crate::interfaces::DemandModel;
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::PI;

use super::seasonal_phase;

/// Household demand peaking in winter:
/// `base × (1 + amplitude × sin(2π·d/365 + π) + N(0, σ))`, never below 0.
#[derive(Debug, Clone)]
pub struct SeasonalDemand {
    amplitude: f64,
    noise_std: f64,
}

impl SeasonalDemand {
    pub const DEFAULT_AMPLITUDE: f64 = 0.3;
    pub const DEFAULT_NOISE: f64 = 0.02;

    /// `None` when `noise_std` is negative or not finite
    pub fn new(amplitude: f64, noise_std: f64) -> Option<Self> {
        if !noise_std.is_finite() || noise_std < 0.0 {
            return None;
        }
        Some(Self {
            amplitude,
            noise_std,
        })
    }

    /// Demand without the noise term
    pub fn seasonal_demand(&self, day: u32, base_demand: f64) -> f64 {
        base_demand * (1.0 + self.amplitude * (seasonal_phase(day) + PI).sin())
    }
}

impl Default for SeasonalDemand {
    fn default() -> Self {
        Self {
            amplitude: Self::DEFAULT_AMPLITUDE,
            noise_std: Self::DEFAULT_NOISE,
        }
    }
}

impl DemandModel for SeasonalDemand {
    fn demand(&self, day: u32, base_demand: f64, rng: &mut dyn RngCore) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        let noise = base_demand * self.noise_std * z;
        (self.seasonal_demand(day, base_demand) + noise).max(0.0)
    }
}
