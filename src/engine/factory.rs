// ============================================================================
// Clearing Engine Factory
// Creates clearing engines with proper configuration
// ============================================================================

use crate::domain::{MarketConfig, MarketMode};
use crate::engine::{CentralOnly, MarketClearingEngine, PeerToPeer};
use crate::error::MarketResult;
use crate::interfaces::{ClearingAlgorithm, EventHandler};
use crate::numeric::Price;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a clearing engine from configuration
///
/// # Arguments
/// * `config` - Market configuration
/// * `event_handler` - Event handler for order and trade events
///
/// # Example
/// ```
/// use energy_market::prelude::*;
/// use energy_market::engine::factory::create_from_config;
/// use std::sync::Arc;
///
/// let config = MarketConfig::dutch_retail();
/// let engine = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(engine.algorithm_name(), "PeerToPeer");
/// ```
pub fn create_from_config(
    config: MarketConfig,
    event_handler: Arc<dyn EventHandler>,
) -> MarketResult<MarketClearingEngine> {
    config.validate()?;

    let algorithm = create_clearing_algorithm(config.mode);

    Ok(MarketClearingEngine::new(config, algorithm, event_handler))
}

/// Creates the clearing algorithm for a market mode
fn create_clearing_algorithm(mode: MarketMode) -> Box<dyn ClearingAlgorithm> {
    match mode {
        MarketMode::PeerToPeer => Box::new(PeerToPeer::new()),
        MarketMode::CentralOnly => Box::new(CentralOnly::new()),
    }
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for clearing engines with a fluent API
///
/// # Example
/// ```
/// use energy_market::prelude::*;
/// use energy_market::engine::factory::ClearingEngineBuilder;
/// use rust_decimal::Decimal;
/// use std::sync::Arc;
///
/// let engine = ClearingEngineBuilder::new()
///     .peer_to_peer()
///     .with_central_prices(Decimal::new(5, 2), Decimal::new(30, 2))
///     .build(Arc::new(NoOpEventHandler))
///     .unwrap();
/// assert_eq!(engine.prices().ceiling(), Decimal::new(30, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClearingEngineBuilder {
    config: MarketConfig,
}

impl ClearingEngineBuilder {
    /// Start from the Dutch retail tariffs in peer-to-peer mode
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: MarketConfig) -> Self {
        Self { config }
    }

    /// Peer double auction with central fallback (default)
    pub fn peer_to_peer(mut self) -> Self {
        self.config.mode = MarketMode::PeerToPeer;
        self
    }

    /// Central agent as the only counterparty
    pub fn central_only(mut self) -> Self {
        self.config.mode = MarketMode::CentralOnly;
        self
    }

    pub fn with_central_prices(mut self, buy_price: Price, sell_price: Price) -> Self {
        self.config = self.config.with_central_prices(buy_price, sell_price);
        self
    }

    /// Build the clearing engine
    pub fn build(self, event_handler: Arc<dyn EventHandler>) -> MarketResult<MarketClearingEngine> {
        create_from_config(self.config, event_handler)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &MarketConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketError;
    use crate::interfaces::NoOpEventHandler;
    use rust_decimal::Decimal;

    #[test]
    fn test_create_peer_to_peer_engine() {
        let engine =
            create_from_config(MarketConfig::dutch_retail(), Arc::new(NoOpEventHandler)).unwrap();
        assert_eq!(engine.algorithm_name(), "PeerToPeer");
        assert_eq!(engine.prices().buy_price, Decimal::new(7, 2));
    }

    #[test]
    fn test_create_central_only_engine() {
        let engine = create_from_config(
            MarketConfig::dutch_retail_central_only(),
            Arc::new(NoOpEventHandler),
        )
        .unwrap();
        assert_eq!(engine.algorithm_name(), "CentralOnly");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MarketConfig::dutch_retail()
            .with_central_prices(Decimal::new(30, 2), Decimal::new(24, 2));
        let result = create_from_config(config, Arc::new(NoOpEventHandler));
        assert!(matches!(result, Err(MarketError::InvalidConfig(_))));
    }

    #[test]
    fn test_builder_pattern() {
        let builder = ClearingEngineBuilder::new()
            .central_only()
            .with_central_prices(Decimal::new(5, 2), Decimal::new(20, 2));
        assert_eq!(builder.get_config().mode, MarketMode::CentralOnly);

        let engine = builder.build(Arc::new(NoOpEventHandler)).unwrap();
        assert_eq!(engine.algorithm_name(), "CentralOnly");
        assert_eq!(engine.prices().sell_price, Decimal::new(20, 2));
    }
}
