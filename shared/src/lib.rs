//! Shared types for UME payments
//!
//! Payment selection enums, the commission breakdown record and the
//! unified error type used by the payments library and the quote CLI.

pub mod error;
pub mod models;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::payment::{
    InstallmentPeriod, PaymentBreakdown, PaymentMethod, PaymentSelection, Terminal,
};
