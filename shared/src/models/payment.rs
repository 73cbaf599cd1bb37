//! Payment Model
//!
//! Closed enumerations for how a treatment is paid for, the selection a
//! payment-entry form holds, and the commission breakdown shown to staff.

use crate::error::{AppError, AppResult, ErrorCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Payment Method
// ============================================================================

/// Payment method (método de pago)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Efectivo
    #[default]
    Cash,
    /// Transferencia bancaria
    Transfer,
    /// Tarjeta de débito
    Debit,
    /// Tarjeta de crédito
    Credit,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::Debit,
        PaymentMethod::Credit,
    ];

    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Label shown in the payment form
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::Transfer => "Transferencia",
            Self::Debit => "Tarjeta de Débito",
            Self::Credit => "Tarjeta de Crédito",
        }
    }

    /// Card methods go through a terminal
    pub const fn is_card(&self) -> bool {
        matches!(self, Self::Debit | Self::Credit)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| AppError::unknown_payment_method(s.trim()))
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Card payment terminal (red de cobro)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Bbva,
    Openpay,
}

impl Terminal {
    pub const ALL: [Terminal; 2] = [Terminal::Bbva, Terminal::Openpay];

    /// Wire name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bbva => "bbva",
            Self::Openpay => "openpay",
        }
    }

    /// Label shown in the payment form
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bbva => "BBVA",
            Self::Openpay => "OpenPay",
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Terminal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| AppError::unknown_terminal(s.trim()))
    }
}

// ============================================================================
// Installment Period
// ============================================================================

/// Months-without-interest plan length (meses sin intereses)
///
/// Serialized as the bare month count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum InstallmentPeriod {
    Three = 3,
    Six = 6,
    Nine = 9,
    Twelve = 12,
}

impl InstallmentPeriod {
    pub const ALL: [InstallmentPeriod; 4] = [
        InstallmentPeriod::Three,
        InstallmentPeriod::Six,
        InstallmentPeriod::Nine,
        InstallmentPeriod::Twelve,
    ];

    #[inline]
    pub const fn months(&self) -> u8 {
        *self as u8
    }

    /// Label shown in the payment form
    pub fn label(&self) -> String {
        format!("{} meses sin intereses", self.months())
    }
}

impl From<InstallmentPeriod> for u8 {
    #[inline]
    fn from(period: InstallmentPeriod) -> Self {
        period.months()
    }
}

impl TryFrom<u8> for InstallmentPeriod {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Self::Three),
            6 => Ok(Self::Six),
            9 => Ok(Self::Nine),
            12 => Ok(Self::Twelve),
            other => Err(AppError::unsupported_installments(other.into())),
        }
    }
}

impl FromStr for InstallmentPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let months: u8 = s.trim().parse().map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("installment months must be a number, got '{}'", s.trim()),
            )
        })?;
        Self::try_from(months)
    }
}

impl fmt::Display for InstallmentPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.months())
    }
}

// ============================================================================
// Payment Selection
// ============================================================================

/// Payment fields of a treatment record
///
/// Combinations the payment form would never produce (a terminal on a cash
/// payment, installments on debit) are representable; the commission
/// calculation charges nothing for them. Use [`PaymentSelection::validate`]
/// to reject them instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PaymentSelection {
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<Terminal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<InstallmentPeriod>,
}

impl PaymentSelection {
    pub const fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            terminal: None,
            installments: None,
        }
    }

    pub const fn cash() -> Self {
        Self::new(PaymentMethod::Cash)
    }

    pub fn with_terminal(mut self, terminal: Terminal) -> Self {
        self.terminal = Some(terminal);
        self
    }

    pub fn with_installments(mut self, installments: InstallmentPeriod) -> Self {
        self.installments = Some(installments);
        self
    }

    /// Strict consistency check
    pub fn validate(&self) -> AppResult<()> {
        if self.terminal.is_some() && !self.method.is_card() {
            return Err(AppError::with_message(
                ErrorCode::TerminalNotAllowed,
                format!("terminal is not used with {} payments", self.method),
            ));
        }
        if let Some(period) = self.installments
            && (self.method != PaymentMethod::Credit || self.terminal.is_none())
        {
            return Err(AppError::new(ErrorCode::InstallmentsNotAllowed)
                .with_detail("months", period.months()));
        }
        Ok(())
    }
}

// ============================================================================
// Payment Breakdown
// ============================================================================

/// Commission breakdown for one payment
///
/// `total` is always exactly `subtotal + commission + iva`.
/// Amounts serialize as plain JSON numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PaymentBreakdown {
    /// The entered amount, unchanged
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    /// Network commission (amount x rate)
    #[serde(with = "rust_decimal::serde::float")]
    pub commission: Decimal,
    /// IVA charged on the commission
    #[serde(with = "rust_decimal::serde::float")]
    pub iva: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl PaymentBreakdown {
    /// Breakdown with no fees at all
    pub fn fee_free(amount: Decimal) -> Self {
        Self {
            subtotal: amount,
            commission: Decimal::ZERO,
            iva: Decimal::ZERO,
            total: amount,
        }
    }

    pub fn has_commission(&self) -> bool {
        self.commission > Decimal::ZERO
    }

    pub fn has_iva(&self) -> bool {
        self.iva > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_wire_names() {
        for method in PaymentMethod::ALL {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
        }
        let method: PaymentMethod = serde_json::from_str("\"transfer\"").unwrap();
        assert_eq!(method, PaymentMethod::Transfer);
        assert!(serde_json::from_str::<PaymentMethod>("\"cheque\"").is_err());
    }

    #[test]
    fn test_payment_method_from_str() {
        assert_eq!(
            " Credit ".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Credit
        );
        assert_eq!(
            "DEBIT".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Debit
        );

        let err = "paypal".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownPaymentMethod);
    }

    #[test]
    fn test_payment_method_is_card() {
        assert!(!PaymentMethod::Cash.is_card());
        assert!(!PaymentMethod::Transfer.is_card());
        assert!(PaymentMethod::Debit.is_card());
        assert!(PaymentMethod::Credit.is_card());
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }

    #[test]
    fn test_terminal_from_str() {
        assert_eq!("OpenPay".parse::<Terminal>().unwrap(), Terminal::Openpay);
        assert_eq!("bbva".parse::<Terminal>().unwrap(), Terminal::Bbva);

        let err = "banorte".parse::<Terminal>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownTerminal);
        assert_eq!(Terminal::Openpay.label(), "OpenPay");
    }

    #[test]
    fn test_installment_period_try_from() {
        assert_eq!(
            InstallmentPeriod::try_from(3).unwrap(),
            InstallmentPeriod::Three
        );
        assert_eq!(
            InstallmentPeriod::try_from(12).unwrap(),
            InstallmentPeriod::Twelve
        );

        for months in [0u8, 1, 2, 4, 18, 24] {
            let err = InstallmentPeriod::try_from(months).unwrap_err();
            assert_eq!(err.code, ErrorCode::UnsupportedInstallmentPeriod);
        }
    }

    #[test]
    fn test_installment_period_from_str() {
        assert_eq!(
            "9".parse::<InstallmentPeriod>().unwrap(),
            InstallmentPeriod::Nine
        );
        assert_eq!(
            "six".parse::<InstallmentPeriod>().unwrap_err().code,
            ErrorCode::InvalidFormat
        );
        assert_eq!(
            "5".parse::<InstallmentPeriod>().unwrap_err().code,
            ErrorCode::UnsupportedInstallmentPeriod
        );
    }

    #[test]
    fn test_installment_period_serializes_as_months() {
        let json = serde_json::to_string(&InstallmentPeriod::Six).unwrap();
        assert_eq!(json, "6");
        let period: InstallmentPeriod = serde_json::from_str("12").unwrap();
        assert_eq!(period, InstallmentPeriod::Twelve);
        assert!(serde_json::from_str::<InstallmentPeriod>("7").is_err());
        assert_eq!(InstallmentPeriod::Three.label(), "3 meses sin intereses");
    }

    #[test]
    fn test_selection_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&PaymentSelection::cash()).unwrap();
        assert_eq!(json, r#"{"method":"cash"}"#);

        let selection: PaymentSelection =
            serde_json::from_str(r#"{"method":"credit","terminal":"openpay","installments":3}"#)
                .unwrap();
        assert_eq!(
            selection,
            PaymentSelection::new(PaymentMethod::Credit)
                .with_terminal(Terminal::Openpay)
                .with_installments(InstallmentPeriod::Three)
        );
    }

    #[test]
    fn test_selection_validate() {
        assert!(PaymentSelection::cash().validate().is_ok());
        assert!(
            PaymentSelection::new(PaymentMethod::Credit)
                .with_terminal(Terminal::Bbva)
                .with_installments(InstallmentPeriod::Six)
                .validate()
                .is_ok()
        );

        let err = PaymentSelection::cash()
            .with_terminal(Terminal::Bbva)
            .validate()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TerminalNotAllowed);

        let err = PaymentSelection::new(PaymentMethod::Debit)
            .with_terminal(Terminal::Bbva)
            .with_installments(InstallmentPeriod::Three)
            .validate()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InstallmentsNotAllowed);

        let err = PaymentSelection::new(PaymentMethod::Credit)
            .with_installments(InstallmentPeriod::Three)
            .validate()
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InstallmentsNotAllowed);
    }

    #[test]
    fn test_breakdown_helpers() {
        let amount = Decimal::new(1000, 0);
        let fee_free = PaymentBreakdown::fee_free(amount);
        assert_eq!(fee_free.total, amount);
        assert!(!fee_free.has_commission());
        assert!(!fee_free.has_iva());

        let breakdown = PaymentBreakdown {
            subtotal: amount,
            commission: Decimal::new(29, 0),
            iva: Decimal::new(464, 2),
            total: Decimal::new(103364, 2),
        };
        assert!(breakdown.has_commission());
        assert!(breakdown.has_iva());
    }

    #[test]
    fn test_breakdown_serializes_as_numbers() {
        let breakdown = PaymentBreakdown {
            subtotal: Decimal::new(1000, 0),
            commission: Decimal::new(35, 0),
            iva: Decimal::ZERO,
            total: Decimal::new(1035, 0),
        };
        let value = serde_json::to_value(breakdown).unwrap();
        assert_eq!(value["commission"], 35.0);
        assert_eq!(value["total"], 1035.0);
    }
}
