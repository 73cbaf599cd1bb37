//! Command line quoting
//!
//! Replays the payment form from flags: amount, method, terminal, plan.
//! Unlike the form, a terminal on a non-card method is an error here.

use crate::config::Config;
use clap::Parser;
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use std::path::PathBuf;
use ume_payments::{
    CommissionCalculator, PaymentBreakdown, PaymentForm, PaymentMethod, PaymentSelection,
    SummaryLine, Terminal,
};

#[derive(Parser, Debug)]
#[command(
    name = "ume-quote",
    version,
    about = "Cotiza comisión e IVA de un cobro con tarjeta"
)]
pub struct Cli {
    /// Monto a cobrar
    pub amount: f64,

    /// Método de pago: cash, transfer, debit, credit
    #[arg(short, long, default_value = "cash")]
    pub method: PaymentMethod,

    /// Terminal: bbva, openpay
    #[arg(short, long)]
    pub terminal: Option<Terminal>,

    /// Meses sin intereses (1 = pago único)
    #[arg(short, long, default_value_t = 1)]
    pub installments: u8,

    /// Tabla de comisiones JSON (reemplaza RATE_TABLE_PATH)
    #[arg(long)]
    pub rates: Option<PathBuf>,

    /// Salida JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output
#[derive(Debug, Serialize)]
pub struct Quote {
    pub selection: PaymentSelection,
    pub breakdown: PaymentBreakdown,
    pub lines: Vec<SummaryLine>,
}

/// Build the form the flags describe
pub fn build_form(cli: &Cli, config: &Config) -> AppResult<PaymentForm> {
    let table = match &cli.rates {
        Some(path) => ume_payments::RateTable::load(path)?,
        None => config.rate_table()?,
    };

    let mut form =
        PaymentForm::with_calculator(Default::default(), CommissionCalculator::new(table));
    form.set_amount(cli.amount)?;
    form.select_method(cli.method);

    if let Some(terminal) = cli.terminal {
        if !cli.method.is_card() {
            return Err(AppError::with_message(
                ErrorCode::TerminalNotAllowed,
                format!("--terminal is not used with {} payments", cli.method),
            ));
        }
        form.select_terminal(terminal);
    }
    form.select_installments(cli.installments)?;
    Ok(form)
}

pub fn quote(cli: &Cli, config: &Config) -> AppResult<Quote> {
    let form = build_form(cli, config)?;
    Ok(Quote {
        selection: *form.selection(),
        breakdown: form.breakdown(),
        lines: form.summary_lines(),
    })
}

/// Text or JSON rendering of the quote
pub fn run(cli: &Cli, config: &Config) -> AppResult<String> {
    let quote = quote(cli, config)?;
    tracing::info!(
        method = %quote.selection.method,
        total = %quote.breakdown.total,
        "Quote computed"
    );

    if cli.json {
        return serde_json::to_string_pretty(&quote)
            .map_err(|e| AppError::internal(format!("failed to encode quote: {}", e)));
    }
    Ok(render_lines(&quote.lines))
}

/// Label column padded to the widest label
pub fn render_lines(lines: &[SummaryLine]) -> String {
    let width = lines
        .iter()
        .map(|l| l.label.chars().count() + 1)
        .max()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| {
            let label = format!("{}:", l.label);
            let pad = width - label.chars().count();
            format!("{}{}  {}", label, " ".repeat(pad), l.formatted)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
