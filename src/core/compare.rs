//! Positional comparison of schemes against the baseline.
//!
//! Verdicts take the taxpayer's side in a progressive scheme: a band that
//! starts later, ends later, or charges less is favorable.

use super::band::Band;
use super::calculator::{breakdown, total_tax, Breakdown};
use super::income::Income;
use super::scheme::SchemeSet;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// Where a scheme's value sits relative to the baseline's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Lower,
    Higher,
    Equal,
}

impl From<Ordering> for Direction {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Direction::Lower,
            Ordering::Greater => Direction::Higher,
            Ordering::Equal => Direction::Equal,
        }
    }
}

/// Whether a difference favours the taxpayer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Favorable,
    Unfavorable,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldComparison {
    pub direction: Direction,
    pub verdict: Verdict,
}

impl FieldComparison {
    fn new(direction: Direction, higher_is_favorable: bool) -> Self {
        let verdict = match (direction, higher_is_favorable) {
            (Direction::Equal, _) => Verdict::Neutral,
            (Direction::Higher, true) | (Direction::Lower, false) => Verdict::Favorable,
            (Direction::Higher, false) | (Direction::Lower, true) => Verdict::Unfavorable,
        };
        FieldComparison { direction, verdict }
    }

    pub fn is_changed(&self) -> bool {
        self.direction != Direction::Equal
    }
}

/// Field-by-field comparison of one band slot against the baseline's slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandComparison {
    pub start: FieldComparison,
    pub end: FieldComparison,
    pub rate: FieldComparison,
}

impl BandComparison {
    pub fn between(band: &Band, baseline: &Band) -> Self {
        BandComparison {
            start: FieldComparison::new(band.start.cmp(&baseline.start).into(), true),
            end: FieldComparison::new(band.end.cmp(&baseline.end).into(), true),
            rate: FieldComparison::new(band.rate.cmp(&baseline.rate).into(), false),
        }
    }

    pub fn is_changed(&self) -> bool {
        self.start.is_changed() || self.end.is_changed() || self.rate.is_changed()
    }
}

/// Signed difference between a scheme's total tax and the baseline's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalDelta {
    pub amount: Decimal,
    pub direction: Direction,
}

impl TotalDelta {
    pub fn new(total: Decimal, baseline_total: Decimal) -> Self {
        let amount = total - baseline_total;
        TotalDelta {
            amount,
            direction: amount.cmp(&Decimal::ZERO).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeComparison {
    pub name: String,
    pub breakdown: Breakdown,
    /// Per slot; `None` for the baseline itself and wherever either slot is absent
    pub bands: Vec<Option<BandComparison>>,
    pub total_delta: TotalDelta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub income: Income,
    pub schemes: Vec<SchemeComparison>,
}

impl Comparison {
    pub fn baseline(&self) -> &SchemeComparison {
        &self.schemes[0]
    }
}

/// Compare the bands of `band_slots` positionally against `baseline_slots`.
pub fn compare_bands(
    band_slots: &[Option<Band>],
    baseline_slots: &[Option<Band>],
) -> Vec<Option<BandComparison>> {
    band_slots
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let band = slot.as_ref()?;
            let baseline = baseline_slots.get(index)?.as_ref()?;
            Some(BandComparison::between(band, baseline))
        })
        .collect()
}

/// Compute every scheme at `income` and classify its differences from the baseline.
pub fn compare(income: Income, schemes: &SchemeSet) -> Comparison {
    let baseline = schemes.baseline();
    let baseline_total = income
        .amount()
        .map_or(Decimal::ZERO, |amount| total_tax(amount, &baseline.bands));

    let schemes = schemes
        .schemes()
        .iter()
        .enumerate()
        .map(|(index, scheme)| {
            let breakdown = breakdown(income, &scheme.bands);
            let bands = if index == 0 {
                vec![None; scheme.bands.len()]
            } else {
                compare_bands(&scheme.bands, &baseline.bands)
            };
            log::debug!(
                "{}: total {} against baseline {}",
                scheme.name,
                breakdown.total,
                baseline_total
            );
            SchemeComparison {
                name: scheme.name.clone(),
                total_delta: TotalDelta::new(breakdown.total, baseline_total),
                breakdown,
                bands,
            }
        })
        .collect();

    Comparison { income, schemes }
}
