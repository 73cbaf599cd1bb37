//! Payment Form State
//!
//! Selection logic behind the payment-entry form of a treatment record:
//! which selectors are visible, how changing one selection resets the
//! ones that depend on it, and the summary lines shown under the form.

use crate::calculator::CommissionCalculator;
use crate::format::format_currency;
use crate::money::validate_amount;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    InstallmentPeriod, PaymentBreakdown, PaymentMethod, PaymentSelection, Terminal,
};

/// Installment selector value meaning "single payment"
pub const SINGLE_PAYMENT_MONTHS: u8 = 1;

/// One entry of a selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One row of the totals summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub formatted: String,
}

impl SummaryLine {
    fn new(label: &'static str, amount: Decimal) -> Self {
        Self {
            label,
            amount,
            formatted: format_currency(amount),
        }
    }
}

pub fn method_options() -> Vec<SelectOption> {
    PaymentMethod::ALL
        .into_iter()
        .map(|m| SelectOption::new(m.as_str(), m.label()))
        .collect()
}

pub fn terminal_options() -> Vec<SelectOption> {
    Terminal::ALL
        .into_iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect()
}

/// Single payment first, then every plan length
pub fn installment_options() -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new(SINGLE_PAYMENT_MONTHS.to_string(), "Pago único")];
    options.extend(
        InstallmentPeriod::ALL
            .into_iter()
            .map(|p| SelectOption::new(p.months().to_string(), p.label())),
    );
    options
}

/// Live state of the payment form
#[derive(Debug, Clone)]
pub struct PaymentForm {
    amount: Decimal,
    selection: PaymentSelection,
    calculator: CommissionCalculator,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self::new(Decimal::ZERO)
    }
}

impl PaymentForm {
    /// New form, paying cash
    pub fn new(amount: Decimal) -> Self {
        Self::with_calculator(amount, CommissionCalculator::standard())
    }

    pub fn with_calculator(amount: Decimal, calculator: CommissionCalculator) -> Self {
        Self {
            amount,
            selection: PaymentSelection::cash(),
            calculator,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn selection(&self) -> &PaymentSelection {
        &self.selection
    }

    /// Set the amount typed into the form
    pub fn set_amount(&mut self, amount: f64) -> AppResult<()> {
        self.amount = validate_amount(amount)?;
        Ok(())
    }

    pub fn select_method(&mut self, method: PaymentMethod) {
        self.selection.method = method;
        if !method.is_card() {
            self.selection.terminal = None;
            self.selection.installments = None;
        } else if method != PaymentMethod::Credit {
            self.selection.installments = None;
        }
        tracing::debug!(method = %method, selection = ?self.selection, "Payment method selected");
    }

    /// Choosing a terminal resets the plan to a single payment
    pub fn select_terminal(&mut self, terminal: Terminal) {
        if !self.selection.method.is_card() {
            tracing::warn!(
                method = %self.selection.method,
                terminal = %terminal,
                "Ignoring terminal for a non-card payment"
            );
            return;
        }
        self.selection.terminal = Some(terminal);
        self.selection.installments = None;
        tracing::debug!(terminal = %terminal, "Payment terminal selected");
    }

    /// Apply the installment selector value; `1` means single payment
    pub fn select_installments(&mut self, months: u8) -> AppResult<()> {
        if months == SINGLE_PAYMENT_MONTHS {
            self.selection.installments = None;
            return Ok(());
        }

        let period = InstallmentPeriod::try_from(months)?;
        if !self.shows_installments() {
            return Err(AppError::new(ErrorCode::InstallmentsNotAllowed)
                .with_detail("method", self.selection.method.as_str())
                .with_detail("months", months));
        }
        self.selection.installments = Some(period);
        tracing::debug!(months, "Installment plan selected");
        Ok(())
    }

    pub fn shows_terminal(&self) -> bool {
        self.selection.method.is_card()
    }

    pub fn shows_installments(&self) -> bool {
        self.selection.method == PaymentMethod::Credit && self.selection.terminal.is_some()
    }

    /// Value the installment selector displays
    pub fn installment_value(&self) -> u8 {
        self.selection
            .installments
            .map_or(SINGLE_PAYMENT_MONTHS, |p| p.months())
    }

    pub fn breakdown(&self) -> PaymentBreakdown {
        self.calculator.calculate_selection(self.amount, &self.selection)
    }

    /// Subtotal, commission and IVA when charged, then total
    pub fn summary_lines(&self) -> Vec<SummaryLine> {
        let breakdown = self.breakdown();
        let mut lines = vec![SummaryLine::new("Subtotal", breakdown.subtotal)];
        if breakdown.has_commission() {
            lines.push(SummaryLine::new("Comisión", breakdown.commission));
        }
        if breakdown.has_iva() {
            lines.push(SummaryLine::new("IVA sobre comisión", breakdown.iva));
        }
        lines.push(SummaryLine::new("Total", breakdown.total));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(amount: i64) -> PaymentForm {
        PaymentForm::new(Decimal::new(amount, 0))
    }

    fn labels(lines: &[SummaryLine]) -> Vec<&'static str> {
        lines.iter().map(|l| l.label).collect()
    }

    #[test]
    fn test_new_form_is_cash() {
        let f = form(1000);
        assert_eq!(*f.selection(), PaymentSelection::cash());
        assert!(!f.shows_terminal());
        assert!(!f.shows_installments());
        assert_eq!(f.installment_value(), 1);
        assert_eq!(
            f.breakdown(),
            PaymentBreakdown::fee_free(Decimal::new(1000, 0))
        );
    }

    #[test]
    fn test_selector_visibility() {
        let mut f = form(1000);
        f.select_method(PaymentMethod::Debit);
        assert!(f.shows_terminal());
        assert!(!f.shows_installments());

        f.select_method(PaymentMethod::Credit);
        assert!(f.shows_terminal());
        assert!(!f.shows_installments());

        f.select_terminal(Terminal::Bbva);
        assert!(f.shows_installments());
    }

    #[test]
    fn test_non_card_method_clears_terminal_and_plan() {
        let mut f = form(1000);
        f.select_method(PaymentMethod::Credit);
        f.select_terminal(Terminal::Openpay);
        f.select_installments(6).unwrap();

        f.select_method(PaymentMethod::Transfer);
        assert_eq!(f.selection().terminal, None);
        assert_eq!(f.selection().installments, None);
    }

    #[test]
    fn test_switching_to_debit_keeps_terminal_drops_plan() {
        let mut f = form(1000);
        f.select_method(PaymentMethod::Credit);
        f.select_terminal(Terminal::Openpay);
        f.select_installments(12).unwrap();

        f.select_method(PaymentMethod::Debit);
        assert_eq!(f.selection().terminal, Some(Terminal::Openpay));
        assert_eq!(f.selection().installments, None);
    }

    #[test]
    fn test_terminal_change_resets_plan() {
        let mut f = form(1000);
        f.select_method(PaymentMethod::Credit);
        f.select_terminal(Terminal::Bbva);
        f.select_installments(9).unwrap();
        assert_eq!(f.installment_value(), 9);

        f.select_terminal(Terminal::Openpay);
        assert_eq!(f.selection().installments, None);
        assert_eq!(f.installment_value(), 1);
    }

    #[test]
    fn test_terminal_ignored_for_cash() {
        let mut f = form(1000);
        f.select_terminal(Terminal::Bbva);
        assert_eq!(f.selection().terminal, None);
    }

    #[test]
    fn test_select_installments() {
        let mut f = form(1000);
        f.select_method(PaymentMethod::Credit);
        f.select_terminal(Terminal::Bbva);

        f.select_installments(3).unwrap();
        assert_eq!(f.selection().installments, Some(InstallmentPeriod::Three));

        f.select_installments(1).unwrap();
        assert_eq!(f.selection().installments, None);

        f.select_installments(6).unwrap();
        let err = f.select_installments(18).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedInstallmentPeriod);
        assert_eq!(f.selection().installments, Some(InstallmentPeriod::Six));
    }

    #[test]
    fn test_installments_need_credit_and_terminal() {
        let mut f = form(1000);
        f.select_method(PaymentMethod::Credit);
        let err = f.select_installments(3).unwrap_err();
        assert_eq!(err.code, ErrorCode::InstallmentsNotAllowed);

        f.select_method(PaymentMethod::Debit);
        f.select_terminal(Terminal::Bbva);
        let err = f.select_installments(3).unwrap_err();
        assert_eq!(err.code, ErrorCode::InstallmentsNotAllowed);
        assert_eq!(f.selection().installments, None);
    }

    #[test]
    fn test_set_amount() {
        let mut f = PaymentForm::default();
        f.set_amount(1500.0).unwrap();
        assert_eq!(f.amount(), Decimal::new(1500, 0));

        let err = f.set_amount(-10.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(f.amount(), Decimal::new(1500, 0));
    }

    #[test]
    fn test_summary_lines_cash() {
        let f = form(1000);
        let lines = f.summary_lines();
        assert_eq!(labels(&lines), vec!["Subtotal", "Total"]);
        assert_eq!(lines[0].formatted, "$1,000.00");
        assert_eq!(lines[1].formatted, "$1,000.00");
    }

    #[test]
    fn test_summary_lines_bbva_has_no_iva_line() {
        let mut f = form(1000);
        f.select_method(PaymentMethod::Credit);
        f.select_terminal(Terminal::Bbva);
        let lines = f.summary_lines();
        assert_eq!(labels(&lines), vec!["Subtotal", "Comisión", "Total"]);
        assert_eq!(lines[1].formatted, "$35.00");
        assert_eq!(lines[2].formatted, "$1,035.00");
    }

    #[test]
    fn test_summary_lines_openpay() {
        let mut f = form(1000);
        f.select_method(PaymentMethod::Credit);
        f.select_terminal(Terminal::Openpay);
        let lines = f.summary_lines();
        assert_eq!(
            labels(&lines),
            vec!["Subtotal", "Comisión", "IVA sobre comisión", "Total"]
        );
        let formatted: Vec<&str> = lines.iter().map(|l| l.formatted.as_str()).collect();
        assert_eq!(formatted, vec!["$1,000.00", "$29.00", "$4.64", "$1,033.64"]);
    }

    #[test]
    fn test_option_lists() {
        let methods: Vec<String> = method_options().into_iter().map(|o| o.value).collect();
        assert_eq!(methods, vec!["cash", "transfer", "debit", "credit"]);

        let terminals = terminal_options();
        assert_eq!(terminals[0], SelectOption::new("bbva", "BBVA"));
        assert_eq!(terminals[1], SelectOption::new("openpay", "OpenPay"));

        let plans = installment_options();
        assert_eq!(plans.len(), 5);
        assert_eq!(plans[0], SelectOption::new("1", "Pago único"));
        assert_eq!(plans[4], SelectOption::new("12", "12 meses sin intereses"));
    }
}
