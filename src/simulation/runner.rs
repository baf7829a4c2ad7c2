// ============================================================================
// Simulation Runner
// Day loop of one run: roll over, collect orders, clear, record
// ============================================================================

use crate::domain::{CentralAgent, OrderBook, Prosumer};
use crate::energy::{SeasonalDemand, SeasonalSolar};
use crate::engine::{create_from_config, MarketClearingEngine};
use crate::error::{MarketError, MarketResult};
use crate::interfaces::{
    DayContext, DemandModel, EnergyLevelProvider, EventHandler, LoggingEventHandler,
    MarketParticipant, PricingPolicy,
};
use crate::numeric::{price_from_f64, to_f64, Energy, Money, Price, PRICE_DECIMALS};
use crate::population;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{DayRecord, SimulationConfig};

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub run: u32,
    pub seed: u64,
    pub records: Vec<DayRecord>,
    /// Prosumers as they stand after the last day
    pub prosumers: Vec<Prosumer>,
    pub central: CentralAgent,
}

impl RunOutput {
    /// Feedback price of the last simulated day
    pub fn final_price(&self) -> Price {
        self.records
            .last()
            .map(|r| r.avg_price)
            .unwrap_or(Decimal::ZERO)
    }
}

/// A configured experiment. Runs are independent and may execute on
/// different threads against the same `Simulation`.
pub struct Simulation {
    config: SimulationConfig,
    engine: MarketClearingEngine,
    solar: Box<dyn EnergyLevelProvider>,
    demand: Box<dyn DemandModel>,
    pricing: Box<dyn PricingPolicy>,
    base_seed: u64,
}

impl Simulation {
    /// Validate `config` and wire the default models and a tracing event handler.
    pub fn new(config: SimulationConfig) -> MarketResult<Self> {
        Self::with_event_handler(config, Arc::new(LoggingEventHandler))
    }

    pub fn with_event_handler(
        config: SimulationConfig,
        event_handler: Arc<dyn EventHandler>,
    ) -> MarketResult<Self> {
        config.validate()?;

        let engine = create_from_config(config.market.clone(), event_handler)?;
        let base_seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                warn!(seed, "no seed configured, drew one from entropy");
                seed
            }
        };

        Ok(Self {
            solar: Box::new(SeasonalSolar::new(config.seasonal_diff_pct)),
            demand: Box::new(SeasonalDemand::default()),
            pricing: config.pricing.build(config.price_noise),
            engine,
            base_seed,
            config,
        })
    }

    /// Builder method: Replace the production and demand models
    pub fn with_energy_models(
        mut self,
        solar: Box<dyn EnergyLevelProvider>,
        demand: Box<dyn DemandModel>,
    ) -> Self {
        self.solar = solar;
        self.demand = demand;
        self
    }

    /// Builder method: Replace the pricing policy
    pub fn with_pricing_policy(mut self, pricing: Box<dyn PricingPolicy>) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn engine(&self) -> &MarketClearingEngine {
        &self.engine
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Seed of run `run`
    pub fn run_seed(&self, run: u32) -> u64 {
        self.base_seed.wrapping_add(u64::from(run))
    }

    /// Execute one complete run
    pub fn run(&self, run: u32) -> MarketResult<RunOutput> {
        let seed = self.run_seed(run);
        let mut rng = StdRng::seed_from_u64(seed);

        info!(
            run,
            seed,
            agents = self.config.agents,
            days = self.config.days,
            algorithm = self.engine.algorithm_name(),
            pricing = self.pricing.name(),
            "run started"
        );

        let mut prosumers = population::generate(&self.config, &mut rng)?;
        let mut central = CentralAgent::new(*self.engine.prices());
        let mut market_price = self.initial_market_price(&mut rng)?;

        let mut records = Vec::with_capacity(self.config.days as usize);
        for day in 0..self.config.days {
            let record = self.simulate_day(
                run,
                day,
                market_price,
                &mut prosumers,
                &mut central,
                &mut rng,
            )?;
            market_price = record.avg_price;
            records.push(record);
        }

        info!(
            run,
            final_price = %market_price,
            central_balance = %central.account_balance,
            "run finished"
        );

        Ok(RunOutput {
            run,
            seed,
            records,
            prosumers,
            central,
        })
    }

    /// Market price seeding day 0: drawn from the initial price band, to the cent
    fn initial_market_price(&self, rng: &mut StdRng) -> MarketResult<Price> {
        let (low, high) = self.config.initial_price_band();
        let price = price_from_f64(rng.gen_range(to_f64(low)..=to_f64(high)))?;
        Ok(price.round_dp(2))
    }

    fn simulate_day(
        &self,
        run: u32,
        day: u32,
        market_price: Price,
        prosumers: &mut [Prosumer],
        central: &mut CentralAgent,
        rng: &mut StdRng,
    ) -> MarketResult<DayRecord> {
        let ctx = DayContext {
            day,
            energy_level: self.solar.level(day, rng),
            market_price,
            demand_model: self.demand.as_ref(),
            pricing: self.pricing.as_ref(),
        };
        for prosumer in prosumers.iter_mut() {
            prosumer.update_state(&ctx, rng)?;
        }

        let total_demand: Energy = prosumers.iter().map(|p| p.energy_demand).sum();
        let total_produced: Energy = prosumers.iter().map(|p| p.energy_production).sum();

        let book = OrderBook::collect(&*prosumers)?;
        let report = self.engine.clear_day(book, prosumers, central, rng)?;

        if let Some(p) = prosumers.iter().find(|p| !p.energy_balance.is_zero()) {
            return Err(MarketError::InvariantViolation(format!(
                "{} left day {} with energy balance {}",
                p.id(),
                day,
                p.energy_balance
            )));
        }

        let total_balance: Money = prosumers.iter().map(|p| p.account_balance).sum();
        let avg_balance = (total_balance / Decimal::from(prosumers.len())).round_dp(PRICE_DECIMALS);

        debug!(
            run,
            day,
            buy_orders = report.snapshot.buy_orders,
            sell_orders = report.snapshot.sell_orders,
            peer_volume = %report.summary.peer_volume,
            price = %report.summary.weighted_avg_price,
            "day simulated"
        );

        Ok(DayRecord {
            run,
            day,
            date: self.date_of(day)?,
            avg_balance,
            total_demand,
            central_energy_bought: report.summary.central_supplied,
            total_produced,
            avg_price: report.summary.weighted_avg_price,
            central_energy_absorbed: report.summary.central_absorbed,
            peer_volume: report.summary.peer_volume,
        })
    }

    fn date_of(&self, day: u32) -> MarketResult<NaiveDate> {
        self.config
            .start_date
            .checked_add_days(Days::new(u64::from(day)))
            .ok_or_else(|| MarketError::InvalidConfig(format!("day {day} is past the calendar")))
    }
}
