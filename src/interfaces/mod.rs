// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod clearing_algorithm;
mod energy_model;
mod event_handler;
mod participant;
mod pricing_policy;
mod record_sink;

pub use clearing_algorithm::ClearingAlgorithm;
pub use energy_model::{DemandModel, EnergyLevelProvider};
pub use event_handler::{EventHandler, LoggingEventHandler, MarketEvent, NoOpEventHandler};
pub use participant::{DayContext, MarketParticipant};
pub use pricing_policy::{PricingInput, PricingPolicy};
pub use record_sink::RecordSink;
