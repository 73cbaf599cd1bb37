//! Money conversion utilities
//!
//! Amounts entered in the payment form arrive as `f64`. They are converted
//! to `Decimal` once, at the boundary, and all commission arithmetic runs in
//! `Decimal` so the breakdown adds up exactly.

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult};

/// Rounding for displayed monetary values (2 decimal places, half away from zero)
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum amount the payment form accepts ($1,000,000)
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
///
/// If NaN/Infinity or a value beyond the `Decimal` range somehow reaches
/// here, logs an error and returns ZERO.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        if value.is_finite() {
            tracing::error!(value = ?value, "f64 outside the decimal range, defaulting to zero");
        } else {
            tracing::error!(
                value = ?value,
                "Non-finite f64 in commission calculation, defaulting to zero"
            );
        }
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round to cents for display
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate an amount entered in the payment form
pub fn validate_amount(amount: f64) -> AppResult<Decimal> {
    if !amount.is_finite() {
        return Err(AppError::invalid_amount(format!(
            "amount must be a finite number, got {}",
            amount
        )));
    }
    if amount < 0.0 {
        return Err(AppError::invalid_amount(format!(
            "amount must be non-negative, got {}",
            amount
        ))
        .with_detail("amount", amount));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(AppError::invalid_amount(format!(
            "amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        ))
        .with_detail("amount", amount));
    }
    Ok(to_decimal(amount))
}
