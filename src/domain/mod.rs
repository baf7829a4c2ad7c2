// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod order;
pub mod order_book;
pub mod participant;
pub mod trade;

pub use config::{CentralPrices, MarketConfig, MarketMode};
pub use order::{Order, OrderId, ParticipantId, Side};
pub use order_book::{OrderBook, OrderBookSnapshot};
pub use participant::{CentralAgent, HouseType, Prosumer, ProsumerProfile, Sale};
pub use trade::{Trade, TradeId, TradeKind, TradeLog};

// Re-export state machine
pub use order::state::{OrderState, OrderStateTransition};
