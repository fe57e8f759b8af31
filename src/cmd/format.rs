//! Display formatting shared by the text and HTML renderers.

use crate::core::{Direction, Limit, TotalDelta, Verdict};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Dollars with thousands separators and two decimal places, e.g. `$1,234.50`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded.abs());
    let (whole, cents) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("${}{}.{}", sign, grouped, cents)
}

pub fn format_limit(limit: &Limit) -> String {
    match limit {
        Limit::Finite(end) => format_currency(*end),
        Limit::Unbounded => "and above".to_string(),
    }
}

/// Rate in cents per dollar, e.g. `(32.5¢)`, or `(Tax Free)`
pub fn format_rate(rate: Decimal) -> String {
    if rate <= Decimal::ZERO {
        "(Tax Free)".to_string()
    } else {
        format!("({:.1}\u{00A2})", rate * dec!(100))
    }
}

pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", rate * dec!(100))
}

/// Difference against the baseline: `(+$125.00)`, `($-125.00)`, or empty when equal
pub fn format_difference(delta: &TotalDelta) -> String {
    match delta.direction {
        Direction::Higher => format!("(+{})", format_currency(delta.amount)),
        Direction::Lower => format!("({})", format_currency(delta.amount)),
        Direction::Equal => String::new(),
    }
}

pub fn verdict_mark(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Favorable => " \u{2713}",
        Verdict::Unfavorable => " \u{2717}",
        Verdict::Neutral => "",
    }
}
