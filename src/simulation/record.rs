// ============================================================================
// Day Record
// Per-day aggregates emitted to result sinks
// ============================================================================

use crate::numeric::{Energy, Money, Price};
use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayRecord {
    pub run: u32,
    /// Zero-based day index within the run
    pub day: u32,
    pub date: NaiveDate,

    /// Mean prosumer account balance after settlement
    pub avg_balance: Money,
    pub total_demand: Energy,
    /// Energy prosumers bought from the central agent
    pub central_energy_bought: Energy,
    pub total_produced: Energy,
    /// Day feedback price
    pub avg_price: Price,

    /// Energy the central agent absorbed from prosumers
    pub central_energy_absorbed: Energy,
    /// Energy matched between prosumers
    pub peer_volume: Energy,
}

impl DayRecord {
    /// CSV column names, in `to_csv_row` order
    pub const CSV_HEADER: &'static str = "run,timestep,date,average balance,total energy demand,\
        total central energy bought,total energy produced,average price,\
        total central energy absorbed,peer energy traded";

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{}",
            self.run,
            self.day,
            self.date,
            self.avg_balance,
            self.total_demand,
            self.central_energy_bought,
            self.total_produced,
            self.avg_price,
            self.central_energy_absorbed,
            self.peer_volume
        )
    }
}
