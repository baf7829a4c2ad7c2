// ============================================================================
// Market Participant Interface
// Capabilities shared by prosumers and the central agent
// ============================================================================

use crate::domain::{Order, OrderId, ParticipantId};
use crate::error::MarketResult;
use crate::interfaces::{DemandModel, PricingPolicy};
use crate::numeric::{Energy, Money, Price};
use rand::RngCore;

/// Everything a participant needs to roll over into a new day.
pub struct DayContext<'a> {
    /// Zero-based simulated day
    pub day: u32,
    /// Production per panel for the day (kWh)
    pub energy_level: f64,
    /// Previous day's volume-weighted average trade price
    pub market_price: Price,
    pub demand_model: &'a dyn DemandModel,
    pub pricing: &'a dyn PricingPolicy,
}

/// Flat participant interface. The clearing engine only ever talks to
/// participants through this trait; settlement resolves both sides of a
/// trade to a `&mut dyn MarketParticipant`.
pub trait MarketParticipant {
    fn id(&self) -> ParticipantId;

    /// Emit at most one order for the day, stamped with `order_id`.
    fn create_order(&self, order_id: OrderId) -> Option<Order>;

    /// Recompute production, demand and posted price for a new day.
    fn update_state(&mut self, ctx: &DayContext<'_>, rng: &mut dyn RngCore) -> MarketResult<()>;

    /// Apply a settled energy transfer. Positive = received, negative = delivered.
    fn receive_energy(&mut self, amount: Energy);

    /// Apply a settled payment. Positive = received, negative = paid.
    fn credit(&mut self, amount: Money);

    /// Remember a sale for next-day price feedback.
    fn record_sale(&mut self, _amount: Energy, _price: Price) {}
}
