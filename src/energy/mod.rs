// ============================================================================
// Energy Module
// Seasonal production and demand models
// ============================================================================

mod demand;
mod solar;

pub use demand::SeasonalDemand;
pub use solar::{SeasonalSolar, BASE_PANEL_OUTPUT, WEATHER_VARIABILITY};

use std::f64::consts::PI;

pub const DAYS_IN_YEAR: u32 = 365;

/// Position in the yearly cycle, in radians
pub(crate) fn seasonal_phase(day: u32) -> f64 {
    2.0 * PI * f64::from(day % DAYS_IN_YEAR) / f64::from(DAYS_IN_YEAR)
}
