//! Currency formatting (es-MX, Mexican peso)
//!
//! `1033.64` renders as `$1,033.64`: dollar-sign peso symbol, comma
//! thousands separators, period decimals, always two decimal places.

use crate::money::{DECIMAL_PLACES, round_money, to_decimal};
use rust_decimal::Decimal;

const CURRENCY_SYMBOL: &str = "$";

/// Format an amount as peso text
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = round_money(amount);
    rounded.rescale(DECIMAL_PLACES);

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(CURRENCY_SYMBOL);
    out.push_str(&group_thousands(whole));
    out.push('.');
    out.push_str(cents);
    out
}

/// [`format_currency`] for amounts held as `f64`
pub fn format_currency_f64(amount: f64) -> String {
    format_currency(to_decimal(amount))
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(d(103364, 2)), "$1,033.64");
        assert_eq!(format_currency(d(1000, 0)), "$1,000.00");
        assert_eq!(format_currency(d(35, 0)), "$35.00");
        assert_eq!(format_currency(d(464, 2)), "$4.64");
    }

    #[test]
    fn test_format_small_and_zero() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(d(5, 2)), "$0.05");
        assert_eq!(format_currency(d(999, 0)), "$999.00");
    }

    #[test]
    fn test_format_thousands_grouping() {
        assert_eq!(format_currency(d(123456789, 2)), "$1,234,567.89");
        assert_eq!(format_currency(d(100000, 0)), "$100,000.00");
        assert_eq!(format_currency(d(1_000_000, 0)), "$1,000,000.00");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_currency(d(2055685, 4)), "$205.57");
        assert_eq!(format_currency(d(1005, 3)), "$1.01");
        assert_eq!(format_currency(d(10049, 4)), "$1.00");
        assert_eq!(format_currency(d(99995, 3)), "$100.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(d(-5, 0)), "-$5.00");
        assert_eq!(format_currency(d(-123456, 2)), "-$1,234.56");
        // rounds to zero: no sign
        assert_eq!(format_currency(d(-1, 3)), "$0.00");
    }

    #[test]
    fn test_format_currency_f64() {
        assert_eq!(format_currency_f64(1033.64), "$1,033.64");
        assert_eq!(format_currency_f64(1193.72), "$1,193.72");
    }
}
