// ============================================================================
// Engine Module
// Contains the daily clearing business logic
// ============================================================================

mod central;
mod central_only;
mod market_clearing;
mod peer_to_peer;

pub mod factory;
pub mod price_discovery;
pub mod settlement;

pub use central_only::CentralOnly;
pub use factory::{create_from_config, ClearingEngineBuilder};
pub use market_clearing::{ClearingReport, MarketClearingEngine};
pub use peer_to_peer::PeerToPeer;
pub use price_discovery::{weighted_average_price, DaySummary};
pub use settlement::{settle, SettlementTotals};
