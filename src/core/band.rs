use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of a tax band.
///
/// `Unbounded` orders above every finite value, so `min(income, end)` and
/// band comparisons need no special casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Decimal>", into = "Option<Decimal>")]
pub enum Limit {
    Finite(Decimal),
    Unbounded,
}

impl Limit {
    /// The smaller of `amount` and this limit.
    pub fn cap(&self, amount: Decimal) -> Decimal {
        match self {
            Limit::Finite(end) => amount.min(*end),
            Limit::Unbounded => amount,
        }
    }

    pub fn finite(&self) -> Option<Decimal> {
        match self {
            Limit::Finite(end) => Some(*end),
            Limit::Unbounded => None,
        }
    }
}

impl From<Option<Decimal>> for Limit {
    fn from(end: Option<Decimal>) -> Self {
        end.map_or(Limit::Unbounded, Limit::Finite)
    }
}

impl From<Limit> for Option<Decimal> {
    fn from(limit: Limit) -> Self {
        limit.finite()
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Finite(end) => write!(f, "{}", end),
            Limit::Unbounded => write!(f, "and above"),
        }
    }
}

/// A contiguous income range taxed at a single marginal rate.
///
/// Both `start` and a finite `end` are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Band {
    /// First taxable unit of the band
    #[schemars(with = "f64")]
    pub start: Decimal,
    /// Last taxable unit of the band, `null` when unbounded above
    #[schemars(with = "Option<f64>")]
    pub end: Limit,
    /// Marginal rate as a fraction (e.g. 0.19 for 19%)
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

impl Band {
    pub fn new(start: Decimal, end: Option<Decimal>, rate: Decimal) -> Self {
        Band {
            start,
            end: end.into(),
            rate,
        }
    }

    pub fn is_tax_free(&self) -> bool {
        self.rate <= Decimal::ZERO
    }
}
