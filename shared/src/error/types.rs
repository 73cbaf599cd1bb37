//! Error types

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type for every boundary that can reject input:
/// parsing payment selections, validating entered amounts, loading a
/// rate table. The commission calculation itself has no error path.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create an invalid amount error
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidAmount, msg)
    }

    /// Create an unknown payment method error for the rejected input
    pub fn unknown_payment_method(input: impl Into<String>) -> Self {
        let input = input.into();
        Self::with_message(
            ErrorCode::UnknownPaymentMethod,
            format!("unknown payment method '{}'", input),
        )
        .with_detail("value", input)
    }

    /// Create an unknown terminal error for the rejected input
    pub fn unknown_terminal(input: impl Into<String>) -> Self {
        let input = input.into();
        Self::with_message(
            ErrorCode::UnknownTerminal,
            format!("unknown terminal '{}'", input),
        )
        .with_detail("value", input)
    }

    /// Create an unsupported installment period error
    pub fn unsupported_installments(months: u64) -> Self {
        Self::with_message(
            ErrorCode::UnsupportedInstallmentPeriod,
            format!("{} months is not an offered installment plan", months),
        )
        .with_detail("months", months)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
