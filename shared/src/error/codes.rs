//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are carried as u16 values so they survive JSON output unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 5xxx: Payment ====================
    /// Payment method is not one of cash, transfer, debit, credit
    UnknownPaymentMethod = 5001,
    /// Terminal is not one of bbva, openpay
    UnknownTerminal = 5002,
    /// Installment plan length is not offered
    UnsupportedInstallmentPeriod = 5003,
    /// Installment plan requires a credit card and a terminal
    InstallmentsNotAllowed = 5004,
    /// Terminal requires a card payment method
    TerminalNotAllowed = 5005,
    /// Amount is negative, non-finite or above the limit
    InvalidAmount = 5006,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidFormat => "Invalid format",

            // Payment
            ErrorCode::UnknownPaymentMethod => "Unknown payment method",
            ErrorCode::UnknownTerminal => "Unknown payment terminal",
            ErrorCode::UnsupportedInstallmentPeriod => "Installment period is not supported",
            ErrorCode::InstallmentsNotAllowed => {
                "Installments require a credit card payment with a terminal"
            }
            ErrorCode::TerminalNotAllowed => "Terminal requires a card payment method",
            ErrorCode::InvalidAmount => "Invalid payment amount",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            6 => Ok(ErrorCode::InvalidFormat),

            // Payment
            5001 => Ok(ErrorCode::UnknownPaymentMethod),
            5002 => Ok(ErrorCode::UnknownTerminal),
            5003 => Ok(ErrorCode::UnsupportedInstallmentPeriod),
            5004 => Ok(ErrorCode::InstallmentsNotAllowed),
            5005 => Ok(ErrorCode::TerminalNotAllowed),
            5006 => Ok(ErrorCode::InvalidAmount),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
