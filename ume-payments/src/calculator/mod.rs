//! Commission Calculator
//!
//! Maps an amount and a payment selection to a [`PaymentBreakdown`].
//! Pure: no I/O, no shared mutable state, never fails. A breakdown that
//! would overflow `Decimal` is charged no fees.
//!
//! Rate selection, first match wins:
//! 1. not a credit payment: no commission (debit included)
//! 2. credit, terminal and installments: the installment row's rate for the
//!    terminal, or zero when the table has no row for that plan
//! 3. credit and terminal: the terminal's one-time rate
//! 4. credit without terminal: no commission
//!
//! IVA is charged on the commission for terminals the table lists (OpenPay).

use crate::money::to_decimal;
use crate::rates::RateTable;
use rust_decimal::Decimal;
use shared::models::{
    InstallmentPeriod, PaymentBreakdown, PaymentMethod, PaymentSelection, Terminal,
};
use std::sync::LazyLock;

static STANDARD: LazyLock<CommissionCalculator> = LazyLock::new(CommissionCalculator::standard);

/// Commission calculator over a rate table
#[derive(Debug, Clone, Default)]
pub struct CommissionCalculator {
    table: RateTable,
}

impl CommissionCalculator {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// Calculator over the clinic's current policy
    pub fn standard() -> Self {
        Self::new(RateTable::standard())
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Commission rate for a selection
    pub fn rate_for(
        &self,
        method: PaymentMethod,
        terminal: Option<Terminal>,
        installments: Option<InstallmentPeriod>,
    ) -> Decimal {
        if method != PaymentMethod::Credit {
            return Decimal::ZERO;
        }
        match (terminal, installments) {
            (Some(terminal), Some(months)) => self
                .table
                .installment_rate(months, terminal)
                .unwrap_or(Decimal::ZERO),
            (Some(terminal), None) => self.table.base_rate(terminal),
            (None, _) => Decimal::ZERO,
        }
    }

    /// Full breakdown for an amount
    pub fn calculate(
        &self,
        amount: Decimal,
        method: PaymentMethod,
        terminal: Option<Terminal>,
        installments: Option<InstallmentPeriod>,
    ) -> PaymentBreakdown {
        let rate = self.rate_for(method, terminal, installments);
        let Some(breakdown) = self.charge(amount, rate, terminal) else {
            tracing::error!(
                amount = %amount,
                rate = %rate,
                "Commission overflows the decimal range, charging no fees"
            );
            return PaymentBreakdown::fee_free(amount);
        };

        tracing::debug!(
            method = %method,
            terminal = ?terminal,
            installments = ?installments.map(|p| p.months()),
            rate = %rate,
            commission = %breakdown.commission,
            iva = %breakdown.iva,
            total = %breakdown.total,
            "Calculated payment breakdown"
        );

        breakdown
    }

    /// Commission, IVA and total, or `None` on decimal overflow
    fn charge(
        &self,
        amount: Decimal,
        rate: Decimal,
        terminal: Option<Terminal>,
    ) -> Option<PaymentBreakdown> {
        let commission = amount.checked_mul(rate)?;
        let iva = match terminal {
            Some(t) if self.table.iva_applies(t) => commission.checked_mul(self.table.iva)?,
            _ => Decimal::ZERO,
        };
        let total = amount.checked_add(commission)?.checked_add(iva)?;

        Some(PaymentBreakdown {
            subtotal: amount,
            commission,
            iva,
            total,
        })
    }

    pub fn calculate_selection(
        &self,
        amount: Decimal,
        selection: &PaymentSelection,
    ) -> PaymentBreakdown {
        self.calculate(
            amount,
            selection.method,
            selection.terminal,
            selection.installments,
        )
    }
}

/// Breakdown under the standard rate table
pub fn calculate_total(
    amount: Decimal,
    method: PaymentMethod,
    terminal: Option<Terminal>,
    installments: Option<InstallmentPeriod>,
) -> PaymentBreakdown {
    STANDARD.calculate(amount, method, terminal, installments)
}

/// [`calculate_total`] for amounts held as `f64`
pub fn calculate_total_f64(
    amount: f64,
    method: PaymentMethod,
    terminal: Option<Terminal>,
    installments: Option<InstallmentPeriod>,
) -> PaymentBreakdown {
    calculate_total(to_decimal(amount), method, terminal, installments)
}
