// ============================================================================
// Clearing Algorithm Interface
// Defines the contract for pluggable daily clearing algorithms
// ============================================================================

use crate::domain::{CentralPrices, OrderBook, Trade};
use crate::error::MarketResult;
use rand::RngCore;

/// Strategy pattern interface for clearing one day's order book
/// Implementations: PeerToPeer (double auction + central fallback), CentralOnly
pub trait ClearingAlgorithm: Send + Sync {
    /// Match every order in the book, filling each one to completion
    ///
    /// # Arguments
    /// * `book` - The day's orders; fills are applied in place
    /// * `prices` - Central agent tariffs (fallback prices and peer ceiling)
    /// * `rng` - Source for any randomised tie-breaking
    ///
    /// # Returns
    /// Trades in the order they were executed. Settlement is not applied.
    fn match_orders(
        &self,
        book: &mut OrderBook,
        prices: &CentralPrices,
        rng: &mut dyn RngCore,
    ) -> MarketResult<Vec<Trade>>;

    /// Get the algorithm name for logging
    fn name(&self) -> &str;
}
