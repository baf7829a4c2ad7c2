// ============================================================================
// Decimal Conversions
// Boundary between f64 model outputs and decimal market quantities
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Energy in kWh
pub type Energy = Decimal;

/// Price in currency per kWh
pub type Price = Decimal;

/// Currency amount (account balances, trade notionals)
pub type Money = Decimal;

/// Decimal places kept for energy coming out of the models (1 mWh resolution)
pub const ENERGY_DECIMALS: u32 = 6;

/// Decimal places kept for prices coming out of the pricing policies
pub const PRICE_DECIMALS: u32 = 6;

fn decimal_from_f64(value: f64, dp: u32) -> NumericResult<Decimal> {
    if !value.is_finite() {
        return Err(NumericError::NonFinite);
    }

    Decimal::from_f64(value)
        .map(|d| d.round_dp(dp))
        .ok_or(NumericError::Overflow)
}

/// Convert a model output into an energy quantity.
///
/// # Errors
/// `NonFinite` for NaN/infinity, `Negative` for values below zero,
/// `Overflow` when the value does not fit a decimal.
pub fn energy_from_f64(value: f64) -> NumericResult<Energy> {
    let energy = decimal_from_f64(value, ENERGY_DECIMALS)?;
    if energy.is_sign_negative() && !energy.is_zero() {
        return Err(NumericError::Negative);
    }
    Ok(energy)
}

/// Convert a model output into a price. Negative prices are allowed here;
/// callers floor posted prices at zero themselves.
pub fn price_from_f64(value: f64) -> NumericResult<Price> {
    decimal_from_f64(value, PRICE_DECIMALS)
}

/// Lossy conversion for display and for feeding decimals back into f64 models.
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
