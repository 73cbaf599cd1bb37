//! UME payments
//!
//! Commission pricing for treatment payments taken at the clinic:
//!
//! - [`rates`]: the rate policy as data (one-time, installment, IVA)
//! - [`calculator`]: amount + payment selection to a [`PaymentBreakdown`]
//! - [`format`]: es-MX peso formatting for display
//! - [`form`]: selection state of the payment-entry form
//!
//! ```
//! use rust_decimal::Decimal;
//! use ume_payments::{PaymentMethod, Terminal, calculate_total, format_currency};
//!
//! let amount = Decimal::new(1000, 0);
//! let b = calculate_total(amount, PaymentMethod::Credit, Some(Terminal::Openpay), None);
//! assert_eq!(format_currency(b.total), "$1,033.64");
//! ```

pub mod calculator;
pub mod form;
pub mod format;
pub mod money;
pub mod rates;

pub use calculator::{CommissionCalculator, calculate_total, calculate_total_f64};
pub use form::{PaymentForm, SelectOption, SummaryLine};
pub use format::{format_currency, format_currency_f64};
pub use rates::RateTable;

// Re-export shared payment types
pub use shared::error::{AppError, AppResult, ErrorCode};
pub use shared::models::{
    InstallmentPeriod, PaymentBreakdown, PaymentMethod, PaymentSelection, Terminal,
};
