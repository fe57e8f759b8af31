use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Income as entered by the user.
///
/// Anything that is not a finite number strictly above zero is `Invalid`.
/// Invalid income is an input mode, not an error: every band is still
/// listed, each with zero tax payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "amount", rename_all = "snake_case")]
pub enum Income {
    Taxable(Decimal),
    Invalid,
}

impl Income {
    pub fn new(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            Income::Taxable(amount)
        } else {
            Income::Invalid
        }
    }

    /// Parse user input, tolerating a leading `$` and thousands separators.
    pub fn parse(input: &str) -> Self {
        let cleaned: String = input
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        Decimal::from_str(&cleaned).map_or(Income::Invalid, Income::new)
    }

    pub fn from_f64(amount: f64) -> Self {
        if !amount.is_finite() {
            return Income::Invalid;
        }
        Decimal::from_f64(amount).map_or(Income::Invalid, Income::new)
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Income::Taxable(amount) => Some(*amount),
            Income::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Income::Taxable(_))
    }
}

impl From<Decimal> for Income {
    fn from(amount: Decimal) -> Self {
        Income::new(amount)
    }
}
