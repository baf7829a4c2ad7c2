// ============================================================================
// Simulation Module
// Drives the clearing engine over days and runs
// ============================================================================

mod config;
mod record;
mod runner;
mod sink;

pub mod experiment;

pub use config::{SimulationConfig, INITIAL_PRICE_MARGIN};
pub use experiment::{run_experiment, ExperimentSummary};
pub use record::DayRecord;
pub use runner::{RunOutput, Simulation};
pub use sink::{CsvSink, MemorySink};

#[cfg(feature = "serde")]
pub use sink::JsonLinesSink;
