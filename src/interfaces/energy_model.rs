// ============================================================================
// Energy Model Interfaces
// Daily production level and household demand
// ============================================================================

use rand::RngCore;

/// Production per unit of capacity (one panel) for a day, in kWh.
pub trait EnergyLevelProvider: Send + Sync {
    fn level(&self, day: u32, rng: &mut dyn RngCore) -> f64;
}

/// A household's demand for a day, in kWh, given its base daily demand.
pub trait DemandModel: Send + Sync {
    fn demand(&self, day: u32, base_demand: f64, rng: &mut dyn RngCore) -> f64;
}
