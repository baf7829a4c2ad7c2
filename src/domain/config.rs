// ============================================================================
// Market Configuration
// Central agent tariffs and clearing mode
// ============================================================================

use crate::error::{MarketError, MarketResult};
use crate::numeric::Price;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Market Mode
// ============================================================================

/// Which clearing algorithm runs each day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarketMode {
    /// Peer double auction, central agent as fallback counterparty
    /// - Sells matched cheapest-first against randomly ordered buyers
    /// - Asks above the central sell price never trade peer-to-peer
    #[default]
    PeerToPeer,

    /// Central agent is the only counterparty
    /// - Baseline for measuring what the peer market adds
    CentralOnly,
}

// ============================================================================
// Central Prices
// ============================================================================

/// Fixed tariffs of the central agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CentralPrices {
    /// Price the central agent pays for absorbed surplus
    pub buy_price: Price,
    /// Price the central agent charges for supplied energy; also the
    /// ceiling above which peer asks are ineligible
    pub sell_price: Price,
}

impl CentralPrices {
    pub fn new(buy_price: Price, sell_price: Price) -> Self {
        Self {
            buy_price,
            sell_price,
        }
    }

    /// Ceiling for peer asks
    pub fn ceiling(&self) -> Price {
        self.sell_price
    }
}

// ============================================================================
// Complete Market Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarketConfig {
    pub central_buy_price: Price,
    pub central_sell_price: Price,
    pub mode: MarketMode,
}

impl MarketConfig {
    pub fn new(central_buy_price: Price, central_sell_price: Price, mode: MarketMode) -> Self {
        Self {
            central_buy_price,
            central_sell_price,
            mode,
        }
    }

    /// Builder method: Set the clearing mode
    pub fn with_mode(mut self, mode: MarketMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: Set both central tariffs
    pub fn with_central_prices(mut self, buy_price: Price, sell_price: Price) -> Self {
        self.central_buy_price = buy_price;
        self.central_sell_price = sell_price;
        self
    }

    pub fn central_prices(&self) -> CentralPrices {
        CentralPrices::new(self.central_buy_price, self.central_sell_price)
    }

    /// Validate the configuration
    pub fn validate(&self) -> MarketResult<()> {
        if self.central_buy_price <= Decimal::ZERO {
            return Err(MarketError::InvalidConfig(
                "Central buy price must be positive".to_string(),
            ));
        }

        if self.central_sell_price <= Decimal::ZERO {
            return Err(MarketError::InvalidConfig(
                "Central sell price must be positive".to_string(),
            ));
        }

        // Spread must not be inverted
        if self.central_buy_price > self.central_sell_price {
            return Err(MarketError::InvalidConfig(format!(
                "Central buy price {} exceeds central sell price {}",
                self.central_buy_price, self.central_sell_price
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl MarketConfig {
    /// Dutch retail-style tariffs
    /// - Feed-in compensation: 0.07 per kWh
    /// - Supply tariff: 0.24 per kWh
    /// - Peer-to-peer clearing
    pub fn dutch_retail() -> Self {
        Self::new(
            Decimal::new(7, 2),
            Decimal::new(24, 2),
            MarketMode::PeerToPeer,
        )
    }

    /// Same tariffs without a peer market
    pub fn dutch_retail_central_only() -> Self {
        Self::dutch_retail().with_mode(MarketMode::CentralOnly)
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self::dutch_retail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = MarketConfig::dutch_retail();

        assert_eq!(config.central_buy_price, Decimal::new(7, 2));
        assert_eq!(config.central_sell_price, Decimal::new(24, 2));
        assert_eq!(config.mode, MarketMode::PeerToPeer);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MarketConfig::default()
            .with_mode(MarketMode::CentralOnly)
            .with_central_prices(Decimal::new(5, 2), Decimal::new(30, 2));

        assert_eq!(config.mode, MarketMode::CentralOnly);
        assert_eq!(config.central_prices().ceiling(), Decimal::new(30, 2));
    }

    #[test]
    fn test_validation() {
        let zero = MarketConfig::default().with_central_prices(Decimal::ZERO, Decimal::ONE);
        assert!(matches!(
            zero.validate(),
            Err(MarketError::InvalidConfig(_))
        ));

        let inverted =
            MarketConfig::default().with_central_prices(Decimal::new(30, 2), Decimal::new(20, 2));
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_preset_configs() {
        let central = MarketConfig::dutch_retail_central_only();
        assert!(matches!(central.mode, MarketMode::CentralOnly));
        assert_eq!(
            central.central_prices(),
            MarketConfig::dutch_retail().central_prices()
        );
    }
}
