//! Unified error system for UME payments
//!
//! - [`ErrorCode`]: Standardized error codes for every failure the boundary code reports
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::UnknownTerminal);
//! assert_eq!(err.code.code(), 5002);
//!
//! let err = AppError::invalid_amount("amount must be non-negative")
//!     .with_detail("amount", -1.0);
//! assert!(err.details.is_some());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
