//! Commission Rate Table
//!
//! The pricing policy as data: one-time rates per terminal, installment
//! rates per plan length and terminal, and the IVA charged on commission.
//! The calculator only looks rates up here, so a revised policy is a new
//! table, not new branches.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{InstallmentPeriod, Terminal};
use std::collections::HashSet;
use std::path::Path;

/// Build a rate from its digits and scale (`rate(35, 3)` is 0.035)
const fn rate(digits: u32, scale: u32) -> Decimal {
    Decimal::from_parts(digits, 0, 0, false, scale)
}

/// IVA charged on commission (16%)
pub const IVA_RATE: Decimal = rate(16, 2);

/// One-time (single payment) credit rates
pub const BASE_RATES: TerminalRates = TerminalRates {
    bbva: rate(35, 3),    // 3.5%
    openpay: rate(29, 3), // 2.9%
};

/// Months-without-interest rates, ordered by plan length
pub const INSTALLMENT_RATES: [InstallmentRate; 4] = [
    InstallmentRate {
        months: InstallmentPeriod::Three,
        bbva: rate(395, 4),  // 3.95%
        openpay: rate(77, 3), // 7.7%
    },
    InstallmentRate {
        months: InstallmentPeriod::Six,
        bbva: rate(65, 3),     // 6.5%
        openpay: rate(107, 3), // 10.7%
    },
    InstallmentRate {
        months: InstallmentPeriod::Nine,
        bbva: rate(9, 2),      // 9%
        openpay: rate(137, 3), // 13.7%
    },
    InstallmentRate {
        months: InstallmentPeriod::Twelve,
        bbva: rate(12, 2),     // 12%
        openpay: rate(167, 3), // 16.7%
    },
];

/// One rate per terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalRates {
    #[serde(with = "rust_decimal::serde::float")]
    pub bbva: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub openpay: Decimal,
}

impl TerminalRates {
    pub fn rate(&self, terminal: Terminal) -> Decimal {
        match terminal {
            Terminal::Bbva => self.bbva,
            Terminal::Openpay => self.openpay,
        }
    }
}

/// Installment row: plan length and its rate per terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRate {
    pub months: InstallmentPeriod,
    #[serde(with = "rust_decimal::serde::float")]
    pub bbva: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub openpay: Decimal,
}

impl InstallmentRate {
    pub fn rate(&self, terminal: Terminal) -> Decimal {
        match terminal {
            Terminal::Bbva => self.bbva,
            Terminal::Openpay => self.openpay,
        }
    }
}

fn default_iva_terminals() -> Vec<Terminal> {
    vec![Terminal::Openpay]
}

/// Complete commission policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Single payment credit rates
    pub base: TerminalRates,
    /// Installment rows; looked up by `months`
    pub installments: Vec<InstallmentRate>,
    /// IVA rate applied to commission
    #[serde(with = "rust_decimal::serde::float")]
    pub iva: Decimal,
    /// Terminals whose commission carries IVA
    #[serde(default = "default_iva_terminals")]
    pub iva_terminals: Vec<Terminal>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RateTable {
    /// The clinic's current policy
    pub fn standard() -> Self {
        Self {
            base: BASE_RATES,
            installments: INSTALLMENT_RATES.to_vec(),
            iva: IVA_RATE,
            iva_terminals: default_iva_terminals(),
        }
    }

    /// One-time rate for a terminal
    pub fn base_rate(&self, terminal: Terminal) -> Decimal {
        self.base.rate(terminal)
    }

    /// Installment rate, or `None` when the table has no row for `months`
    pub fn installment_rate(
        &self,
        months: InstallmentPeriod,
        terminal: Terminal,
    ) -> Option<Decimal> {
        self.installments
            .iter()
            .find(|row| row.months == months)
            .map(|row| row.rate(terminal))
    }

    /// Whether commission charged through `terminal` carries IVA
    pub fn iva_applies(&self, terminal: Terminal) -> bool {
        self.iva_terminals.contains(&terminal)
    }

    /// Parse a table from JSON and validate it
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let table: RateTable = serde_json::from_str(json)
            .map_err(|e| AppError::config(format!("invalid rate table: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("failed to read rate table {}: {}", path.display(), e))
        })?;
        let table = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            installment_rows = table.installments.len(),
            "Loaded commission rate table"
        );
        Ok(table)
    }

    /// Every rate must be a fraction in [0, 1) and each plan length listed once
    pub fn validate(&self) -> AppResult<()> {
        check_fraction("iva", self.iva)?;
        for terminal in Terminal::ALL {
            check_fraction(&format!("base.{}", terminal), self.base.rate(terminal))?;
        }

        let mut seen = HashSet::new();
        for row in &self.installments {
            if !seen.insert(row.months) {
                return Err(AppError::config(format!(
                    "installment period {} is listed more than once",
                    row.months
                ))
                .with_detail("months", row.months.months()));
            }
            for terminal in Terminal::ALL {
                check_fraction(
                    &format!("installments[{}].{}", row.months, terminal),
                    row.rate(terminal),
                )?;
            }
        }
        Ok(())
    }
}

fn check_fraction(field: &str, value: Decimal) -> AppResult<()> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(AppError::config(format!(
            "rate {} must be in [0, 1), got {}",
            field, value
        ))
        .with_detail("field", field));
    }
    Ok(())
}
