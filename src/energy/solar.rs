// ============================================================================
// Seasonal Solar Level
// ============================================================================

use crate::interfaces::EnergyLevelProvider;
use rand::{Rng, RngCore};

use super::{seasonal_phase, DAYS_IN_YEAR};

/// Production of one panel on an average day (kWh)
pub const BASE_PANEL_OUTPUT: f64 = 2.0;

/// Uniform day-to-day weather swing around the seasonal curve
pub const WEATHER_VARIABILITY: f64 = 0.1;

/// `2 × (1 + pct/100 × (sin(2π·d/365) + 0.3) + U(−0.1, 0.1))`, never below 0.
///
/// `seasonal_diff_pct` is the summer/winter production gap in percent; at 0
/// only the weather term remains.
#[derive(Debug, Clone)]
pub struct SeasonalSolar {
    seasonal_diff_pct: f64,
}

impl SeasonalSolar {
    pub fn new(seasonal_diff_pct: f64) -> Self {
        Self { seasonal_diff_pct }
    }

    pub fn seasonal_diff_pct(&self) -> f64 {
        self.seasonal_diff_pct
    }

    /// Level without the weather term
    pub fn seasonal_level(&self, day: u32) -> f64 {
        let seasonality = seasonal_phase(day).sin() + 0.3;
        BASE_PANEL_OUTPUT * (1.0 + self.seasonal_diff_pct / 100.0 * seasonality)
    }
}

impl Default for SeasonalSolar {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl EnergyLevelProvider for SeasonalSolar {
    fn level(&self, day: u32, rng: &mut dyn RngCore) -> f64 {
        let weather = rng.gen_range(-WEATHER_VARIABILITY..WEATHER_VARIABILITY);
        let level = self.seasonal_level(day) + BASE_PANEL_OUTPUT * weather;
        level.max(0.0)
    }
}
