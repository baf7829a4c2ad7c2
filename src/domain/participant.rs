// ============================================================================
// Participant Domain Model
// Prosumers and the fixed-price central agent
// ============================================================================

use crate::error::MarketResult;
use crate::interfaces::{DayContext, MarketParticipant, PricingInput};
use crate::numeric::{energy_from_f64, Energy, Money, Price};
use rand::RngCore;
use rust_decimal::Decimal;
use smallvec::SmallVec;

use super::{CentralPrices, Order, OrderId, ParticipantId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// House Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HouseType {
    Terraced,
    Detached,
    SemiDetached,
    MultiFamily,
}

impl HouseType {
    pub const ALL: [HouseType; 4] = [
        HouseType::Terraced,
        HouseType::Detached,
        HouseType::SemiDetached,
        HouseType::MultiFamily,
    ];

    /// Share of the housing stock, in percent
    pub fn proportion(&self) -> f64 {
        match self {
            HouseType::Terraced => 28.8,
            HouseType::Detached => 5.3,
            HouseType::SemiDetached => 5.3,
            HouseType::MultiFamily => 60.6,
        }
    }

    /// Inclusive range of yearly electricity demand, in kWh
    pub fn yearly_demand_range(&self) -> (u32, u32) {
        match self {
            HouseType::Terraced => (1590, 2610),
            HouseType::Detached => (4390, 4390),
            HouseType::SemiDetached => (2990, 3700),
            HouseType::MultiFamily => (1510, 2210),
        }
    }
}

// ============================================================================
// Prosumer
// ============================================================================

/// One realised sale, kept until the next day's price update
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sale {
    pub amount: Energy,
    pub price: Price,
}

/// Static description of a prosumer, as produced by population generation
#[derive(Debug, Clone, PartialEq)]
pub struct ProsumerProfile {
    pub house_type: HouseType,
    pub panels: u32,
    /// Daily demand before seasonality and noise (kWh)
    pub base_demand: f64,
    pub initial_sell_price: Price,
    pub sensitivity: Price,
}

#[derive(Debug, Clone)]
pub struct Prosumer {
    id: ParticipantId,
    profile: ProsumerProfile,

    pub energy_production: Energy,
    pub energy_demand: Energy,
    /// production - demand + received - delivered
    pub energy_balance: Energy,
    pub energy_bought: Energy,
    pub energy_sold: Energy,

    pub posted_sell_price: Price,
    pub account_balance: Money,

    sales: SmallVec<[Sale; 4]>,
}

impl Prosumer {
    pub fn new(id: ParticipantId, profile: ProsumerProfile) -> Self {
        let posted_sell_price = profile.initial_sell_price.max(Decimal::ZERO);
        Self {
            id,
            profile,
            energy_production: Decimal::ZERO,
            energy_demand: Decimal::ZERO,
            energy_balance: Decimal::ZERO,
            energy_bought: Decimal::ZERO,
            energy_sold: Decimal::ZERO,
            posted_sell_price,
            account_balance: Decimal::ZERO,
            sales: SmallVec::new(),
        }
    }

    pub fn profile(&self) -> &ProsumerProfile {
        &self.profile
    }

    pub fn house_type(&self) -> HouseType {
        self.profile.house_type
    }

    pub fn sensitivity(&self) -> Price {
        self.profile.sensitivity
    }

    /// Sales since the last price update
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Volume-weighted price of the sales since the last price update
    pub fn realized_price(&self) -> Option<Price> {
        let volume: Energy = self.sales.iter().map(|s| s.amount).sum();
        if volume.is_zero() {
            return None;
        }
        let value: Decimal = self.sales.iter().map(|s| s.amount * s.price).sum();
        Some(value / volume)
    }

    /// Production minus demand, before any trade
    pub fn imbalance(&self) -> Energy {
        self.energy_production - self.energy_demand
    }

    fn reset_day(&mut self) {
        self.energy_production = Decimal::ZERO;
        self.energy_demand = Decimal::ZERO;
        self.energy_balance = Decimal::ZERO;
        self.energy_bought = Decimal::ZERO;
        self.energy_sold = Decimal::ZERO;
    }
}

impl MarketParticipant for Prosumer {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn create_order(&self, order_id: OrderId) -> Option<Order> {
        let imbalance = self.imbalance();
        if imbalance > Decimal::ZERO {
            Some(Order::sell(
                order_id,
                self.id,
                imbalance,
                self.posted_sell_price,
            ))
        } else if imbalance < Decimal::ZERO {
            Some(Order::buy(order_id, self.id, -imbalance))
        } else {
            None
        }
    }

    fn update_state(&mut self, ctx: &DayContext<'_>, rng: &mut dyn RngCore) -> MarketResult<()> {
        self.reset_day();

        self.energy_production = energy_from_f64(self.profile.panels as f64 * ctx.energy_level)?;
        self.energy_demand = energy_from_f64(ctx.demand_model.demand(
            ctx.day,
            self.profile.base_demand,
            rng,
        ))?;
        self.energy_balance = self.imbalance();

        let input = PricingInput {
            current_price: self.posted_sell_price,
            sensitivity: self.profile.sensitivity,
            imbalance: self.imbalance(),
            market_price: ctx.market_price,
            realized_price: self.realized_price(),
        };
        self.posted_sell_price = ctx.pricing.next_sell_price(&input, rng).max(Decimal::ZERO);
        self.sales.clear();

        Ok(())
    }

    fn receive_energy(&mut self, amount: Energy) {
        self.energy_balance += amount;
        if amount.is_sign_positive() {
            self.energy_bought += amount;
        } else {
            self.energy_sold -= amount;
        }
    }

    fn credit(&mut self, amount: Money) {
        self.account_balance += amount;
    }

    fn record_sale(&mut self, amount: Energy, price: Price) {
        self.sales.push(Sale { amount, price });
    }
}

// ============================================================================
// Central Agent
// ============================================================================

/// Fixed-price backstop with unlimited capacity. Never posts peer orders.
#[derive(Debug, Clone)]
pub struct CentralAgent {
    prices: CentralPrices,
    pub account_balance: Money,
    /// Cumulative energy absorbed from sellers
    pub energy_bought: Energy,
    /// Cumulative energy supplied to buyers
    pub energy_sold: Energy,
}

impl CentralAgent {
    pub fn new(prices: CentralPrices) -> Self {
        Self {
            prices,
            account_balance: Decimal::ZERO,
            energy_bought: Decimal::ZERO,
            energy_sold: Decimal::ZERO,
        }
    }

    pub fn prices(&self) -> &CentralPrices {
        &self.prices
    }

    pub fn buy_price(&self) -> Price {
        self.prices.buy_price
    }

    pub fn sell_price(&self) -> Price {
        self.prices.sell_price
    }
}

impl MarketParticipant for CentralAgent {
    fn id(&self) -> ParticipantId {
        ParticipantId::CENTRAL
    }

    fn create_order(&self, _order_id: OrderId) -> Option<Order> {
        None
    }

    fn update_state(&mut self, _ctx: &DayContext<'_>, _rng: &mut dyn RngCore) -> MarketResult<()> {
        Ok(())
    }

    fn receive_energy(&mut self, amount: Energy) {
        if amount.is_sign_positive() {
            self.energy_bought += amount;
        } else {
            self.energy_sold -= amount;
        }
    }

    fn credit(&mut self, amount: Money) {
        self.account_balance += amount;
    }
}
