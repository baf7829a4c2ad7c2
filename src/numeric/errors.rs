// ============================================================================
// Numeric Errors
// Error types for conversions into the decimal energy/price domain
// ============================================================================

use std::fmt;

/// Errors that can occur when moving values between the stochastic `f64`
/// models and the decimal clearing arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Input was NaN or infinite
    NonFinite,
    /// A quantity that must be non-negative was negative
    Negative,
    /// Result exceeded the representable decimal range
    Overflow,
    /// Attempted division by zero
    DivisionByZero,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NonFinite => write!(f, "non-finite value: NaN or infinity"),
            NumericError::Negative => write!(f, "negative value where a non-negative one is required"),
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded decimal range")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
