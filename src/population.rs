// ============================================================================
// Population Generator
// Samples the prosumers a run starts with
// ============================================================================

use crate::domain::{HouseType, ParticipantId, Prosumer, ProsumerProfile};
use crate::error::{MarketError, MarketResult};
use crate::numeric::{price_from_f64, to_f64};
use crate::simulation::SimulationConfig;
use rand::distributions::WeightedIndex;
use rand::{Rng, RngCore};
use rand_distr::Distribution;

/// Probability that a household has no panels at all
pub const ZERO_PANEL_PROBABILITY: f64 = 0.25;

/// Relative spread of installed panels around the demand-matching count
pub const PANEL_SIZING_NOISE: f64 = 0.2;

/// Generate `config.agents` prosumers with dense ids `0..agents`.
pub fn generate(config: &SimulationConfig, rng: &mut dyn RngCore) -> MarketResult<Vec<Prosumer>> {
    let weights = HouseType::ALL.map(|h| h.proportion());
    let house_types = WeightedIndex::new(weights)
        .map_err(|e| MarketError::InvalidConfig(format!("house type weights: {e}")))?;

    let (price_low, price_high) = config.initial_price_band();
    let (price_low, price_high) = (to_f64(price_low), to_f64(price_high));
    let (sens_low, sens_high) = config.sensitivity_range;

    let mut prosumers = Vec::with_capacity(config.agents);
    for i in 0..config.agents {
        let id = u32::try_from(i)
            .map_err(|_| MarketError::InvalidConfig(format!("too many agents: {}", config.agents)))?;

        let house_type = HouseType::ALL[house_types.sample(rng)];
        let (demand_low, demand_high) = house_type.yearly_demand_range();
        let yearly_demand = rng.gen_range(demand_low..=demand_high);

        let profile = ProsumerProfile {
            house_type,
            panels: solar_panels(yearly_demand, config.panel_production, rng),
            base_demand: f64::from(yearly_demand) / 365.0,
            initial_sell_price: price_from_f64(rng.gen_range(price_low..=price_high))?,
            sensitivity: price_from_f64(rng.gen_range(sens_low..=sens_high))?,
        };

        prosumers.push(Prosumer::new(ParticipantId::new(id), profile));
    }

    tracing::debug!(agents = prosumers.len(), "population generated");
    Ok(prosumers)
}

/// Panels installed for a yearly demand: none with probability 0.25,
/// otherwise the demand-matching count scaled by U(0.8, 1.2) and rounded.
pub fn solar_panels(yearly_demand: u32, panel_production: f64, rng: &mut dyn RngCore) -> u32 {
    if rng.gen_bool(ZERO_PANEL_PROBABILITY) {
        return 0;
    }

    let yearly_per_panel = (365.0 * panel_production).round().max(1.0);
    let optimal = f64::from(yearly_demand) / yearly_per_panel;
    let noise = rng.gen_range(1.0 - PANEL_SIZING_NOISE..1.0 + PANEL_SIZING_NOISE);

    (optimal * noise).round() as u32
}
