// ============================================================================
// Simulation Configuration
// Population, horizon, pricing and market settings for an experiment
// ============================================================================

use crate::domain::MarketConfig;
use crate::error::{MarketError, MarketResult};
use crate::pricing::PricingKind;
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gap between a central tariff and the initial price band
pub const INITIAL_PRICE_MARGIN: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Prosumers per run
    pub agents: usize,

    /// Independent runs
    pub runs: u32,

    /// Simulated days per run
    pub days: u32,

    /// Base seed; run `r` uses `seed + r`. Drawn from entropy when absent.
    pub seed: Option<u64>,

    /// Inclusive bounds of the per-prosumer price sensitivity
    pub sensitivity_range: (f64, f64),

    /// Scale of a panel's yearly production used when sizing installations
    pub panel_production: f64,

    /// Summer/winter production gap in percent
    pub seasonal_diff_pct: f64,

    /// Calendar date of day 0
    pub start_date: NaiveDate,

    pub pricing: PricingKind,

    /// Half-width of the uniform noise added by imbalance pricing
    pub price_noise: f64,

    /// Threads used to execute runs
    pub workers: usize,

    pub market: MarketConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agents: 200,
            runs: 10,
            days: 1000,
            seed: None,
            sensitivity_range: (0.005, 0.02),
            panel_production: 1.0,
            seasonal_diff_pct: 100.0,
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            pricing: PricingKind::Imbalance,
            price_noise: 0.005,
            workers: 1,
            market: MarketConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Builder method: Set population size
    pub fn with_agents(mut self, agents: usize) -> Self {
        self.agents = agents;
        self
    }

    /// Builder method: Set run count
    pub fn with_runs(mut self, runs: u32) -> Self {
        self.runs = runs;
        self
    }

    /// Builder method: Set horizon
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Builder method: Set base seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: Set market configuration
    pub fn with_market(mut self, market: MarketConfig) -> Self {
        self.market = market;
        self
    }

    /// Builder method: Set pricing policy
    pub fn with_pricing(mut self, pricing: PricingKind) -> Self {
        self.pricing = pricing;
        self
    }

    /// Builder method: Set worker thread count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Band from which initial sell prices and the initial market price
    /// are drawn: one cent inside the central tariffs.
    pub fn initial_price_band(&self) -> (Decimal, Decimal) {
        (
            self.market.central_buy_price + INITIAL_PRICE_MARGIN,
            self.market.central_sell_price - INITIAL_PRICE_MARGIN,
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> MarketResult<()> {
        self.market.validate()?;

        if self.agents == 0 {
            return Err(invalid("at least one agent is required"));
        }
        if self.runs == 0 {
            return Err(invalid("at least one run is required"));
        }
        if self.days == 0 {
            return Err(invalid("at least one day is required"));
        }
        if self.workers == 0 {
            return Err(invalid("at least one worker is required"));
        }

        let (low, high) = self.sensitivity_range;
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
            return Err(MarketError::InvalidConfig(format!(
                "sensitivity range {low}..{high} must be finite, non-negative and ordered"
            )));
        }

        if !self.panel_production.is_finite() || self.panel_production <= 0.0 {
            return Err(invalid("panel production must be positive"));
        }
        // Panels are sized against round(365 × panel_production) kWh
        if (365.0 * self.panel_production).round() < 1.0 {
            return Err(invalid("panel production rounds to zero yearly output"));
        }

        if !self.seasonal_diff_pct.is_finite() || self.seasonal_diff_pct < 0.0 {
            return Err(invalid("seasonal difference must be non-negative"));
        }

        if !self.price_noise.is_finite() || self.price_noise < 0.0 {
            return Err(invalid("price noise must be non-negative"));
        }

        let (band_low, band_high) = self.initial_price_band();
        if band_low > band_high {
            return Err(MarketError::InvalidConfig(format!(
                "central tariffs {} / {} leave no initial price band",
                self.market.central_buy_price, self.market.central_sell_price
            )));
        }

        Ok(())
    }

    /// Load and validate a TOML configuration file
    #[cfg(feature = "serde")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> MarketResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MarketError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(contents: &str) -> MarketResult<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| MarketError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

fn invalid(reason: &str) -> MarketError {
    MarketError::InvalidConfig(reason.to_string())
}
