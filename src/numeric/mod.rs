// ============================================================================
// Numeric Module
// Decimal quantities for exact clearing and settlement arithmetic
// ============================================================================
//
// This module provides:
// - Energy/Price/Money aliases over rust_decimal::Decimal
// - Conversions from the f64 world of the stochastic energy models
// - NumericError: Error types for those conversions
//
// Design principles:
// - Clearing and settlement never touch floating point
// - Conversions reject NaN/infinity instead of propagating them
// - Rounding happens once, at the boundary

mod conversions;
mod errors;

pub use conversions::{
    energy_from_f64, price_from_f64, to_f64, Energy, Money, Price, ENERGY_DECIMALS,
    PRICE_DECIMALS,
};
pub use errors::{NumericError, NumericResult};
