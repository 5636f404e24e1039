//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;

use crate::core::error::BookingError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed monetary amount
pub const MAX_AMOUNT: f64 = 100_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate a payment amount: finite, strictly positive, within bounds
pub fn validate_amount(amount: f64) -> Result<(), BookingError> {
    if !amount.is_finite() {
        return Err(BookingError::InvalidOperation(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount <= 0.0 {
        return Err(BookingError::InvalidOperation(
            "amount must be positive".to_string(),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(BookingError::InvalidOperation(format!(
            "amount exceeds maximum allowed ({MAX_AMOUNT}), got {amount}"
        )));
    }
    Ok(())
}
