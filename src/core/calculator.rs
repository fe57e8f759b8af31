//! Progressive tax band calculation.
//!
//! Bands cover inclusive integer ranges: a band is reached once income is at
//! or above its `start`, and the taxable amount within it is
//! `min(income, end) - start + 1`. The same rule drives both the per-band
//! details and the total, so a total always equals the sum of its details.

use super::band::{Band, Limit};
use super::income::Income;
use rust_decimal::Decimal;
use serde::Serialize;

/// Computed result for one band at a given income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxDetail {
    pub start: Decimal,
    pub end: Limit,
    pub rate: Decimal,
    pub tax_payable: Decimal,
}

impl TaxDetail {
    fn unfilled(band: &Band) -> Self {
        TaxDetail {
            start: band.start,
            end: band.end,
            rate: band.rate,
            tax_payable: Decimal::ZERO,
        }
    }
}

/// Per-band details for one scheme plus their total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub details: Vec<Option<TaxDetail>>,
    pub total: Decimal,
}

impl Breakdown {
    fn from_details(details: Vec<Option<TaxDetail>>) -> Self {
        let total = sum_saturating(details.iter().flatten().map(|d| d.tax_payable));
        Breakdown { details, total }
    }

    /// Total tax as a fraction of income, `None` for invalid income or an unrepresentable rate
    pub fn effective_rate(&self, income: Income) -> Option<Decimal> {
        income.amount().and_then(|amount| self.total.checked_div(amount))
    }
}

fn sum_saturating(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts
        .fold(Decimal::ZERO, |total, amount| total.saturating_add(amount))
        .normalize()
}

/// Tax in one band. Never negative; saturates at `Decimal::MAX` instead of overflowing.
fn band_tax(income: Decimal, band: &Band) -> Decimal {
    if income < band.start || band.rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let taxable = band
        .end
        .cap(income)
        .saturating_sub(band.start)
        .saturating_add(Decimal::ONE);
    if taxable <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    taxable.saturating_mul(band.rate).normalize()
}

/// Tax payable in each band at `income`, one entry per slot.
///
/// Absent slots stay absent. Bands not yet reached report their full range
/// with zero tax payable.
pub fn band_details(income: Decimal, bands: &[Option<Band>]) -> Vec<Option<TaxDetail>> {
    bands
        .iter()
        .map(|slot| {
            slot.as_ref().map(|band| TaxDetail {
                tax_payable: band_tax(income, band),
                ..TaxDetail::unfilled(band)
            })
        })
        .collect()
}

/// Total tax payable across all bands at `income`
pub fn total_tax(income: Decimal, bands: &[Option<Band>]) -> Decimal {
    sum_saturating(bands.iter().flatten().map(|band| band_tax(income, band)))
}

/// Details with zero tax payable, used when there is no valid income yet
pub fn zero_band_details(bands: &[Option<Band>]) -> Vec<Option<TaxDetail>> {
    bands
        .iter()
        .map(|slot| slot.as_ref().map(TaxDetail::unfilled))
        .collect()
}

/// Details and total for `income`, taking the zero path for invalid income
pub fn breakdown(income: Income, bands: &[Option<Band>]) -> Breakdown {
    let details = match income {
        Income::Taxable(amount) => band_details(amount, bands),
        Income::Invalid => zero_band_details(bands),
    };
    log::trace!("breakdown for {:?} over {} slots", income, bands.len());
    Breakdown::from_details(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn band(start: Decimal, end: Option<Decimal>, rate: Decimal) -> Option<Band> {
        Some(Band::new(start, end, rate))
    }

    fn resident_bands() -> Vec<Option<Band>> {
        vec![
            band(dec!(0), Some(dec!(18200)), dec!(0)),
            band(dec!(18201), Some(dec!(45000)), dec!(0.19)),
            band(dec!(45001), None, dec!(0.325)),
        ]
    }

    fn payable(details: &[Option<TaxDetail>]) -> Vec<Option<Decimal>> {
        details.iter().map(|d| d.map(|d| d.tax_payable)).collect()
    }

    #[test]
    fn worked_example_at_50000() {
        let details = band_details(dec!(50000), &resident_bands());
        assert_eq!(
            payable(&details),
            vec![Some(dec!(0)), Some(dec!(5092.00)), Some(dec!(1625.000))]
        );
        assert_eq!(total_tax(dec!(50000), &resident_bands()), dec!(6717));
    }

    #[test]
    fn zero_rate_band_pays_nothing() {
        let bands = vec![band(dec!(0), None, dec!(0))];
        for income in [dec!(1), dec!(18200), dec!(1_000_000)] {
            assert_eq!(band_details(income, &bands)[0].unwrap().tax_payable, dec!(0));
        }
    }

    #[test]
    fn unreached_band_reports_full_range() {
        let details = band_details(dec!(10000), &resident_bands());
        let top = details[2].unwrap();
        assert_eq!(top.start, dec!(45001));
        assert_eq!(top.end, Limit::Unbounded);
        assert_eq!(top.rate, dec!(0.325));
        assert_eq!(top.tax_payable, dec!(0));
    }

    #[test]
    fn saturated_band_taxes_whole_range() {
        let bands = vec![band(dec!(18201), Some(dec!(45000)), dec!(0.19))];
        for income in [dec!(45000), dec!(45001), dec!(900000)] {
            assert_eq!(
                band_details(income, &bands)[0].unwrap().tax_payable,
                (dec!(45000) - dec!(18201) + dec!(1)) * dec!(0.19)
            );
        }
    }

    #[test]
    fn unbounded_band_taxes_income_above_start() {
        let bands = vec![band(dec!(45001), None, dec!(0.325))];
        let income = dec!(250000);
        assert_eq!(
            band_details(income, &bands)[0].unwrap().tax_payable,
            (income - dec!(45001) + dec!(1)) * dec!(0.325)
        );
    }

    #[test]
    fn absent_slots_preserved() {
        let bands = vec![band(dec!(0), Some(dec!(100)), dec!(0)), None, band(dec!(101), None, dec!(0.3))];
        let details = band_details(dec!(200), &bands);
        assert_eq!(details.len(), 3);
        assert!(details[1].is_none());
        assert_eq!(details[2].unwrap().tax_payable, dec!(30.0));
        assert_eq!(total_tax(dec!(200), &bands), dec!(30));
    }

    #[test]
    fn total_equals_detail_sum() {
        let bands = resident_bands();
        for income in [dec!(1), dec!(18200), dec!(18201), dec!(45000), dec!(45001), dec!(123456.78)] {
            let sum: Decimal = band_details(income, &bands)
                .iter()
                .flatten()
                .map(|d| d.tax_payable)
                .sum();
            assert_eq!(total_tax(income, &bands), sum, "income {}", income);
        }
    }

    #[test]
    fn band_reached_at_exact_start() {
        // Inclusive rule: the first unit of a band is taxed. A strict `income > start`
        // reading would give zero here.
        let bands = resident_bands();
        let details = band_details(dec!(18201), &bands);
        assert_eq!(details[1].unwrap().tax_payable, dec!(0.19));
        assert_eq!(total_tax(dec!(18201), &bands), dec!(0.19));
        assert_ne!(total_tax(dec!(18201), &bands), Decimal::ZERO);
    }

    #[test]
    fn income_below_every_start_pays_nothing() {
        let bands = vec![band(dec!(1000), Some(dec!(2000)), dec!(0.1)), band(dec!(2001), None, dec!(0.2))];
        let details = band_details(dec!(999), &bands);
        assert!(details.iter().flatten().all(|d| d.tax_payable == Decimal::ZERO));
        assert_eq!(total_tax(dec!(999), &bands), dec!(0));
    }

    #[test]
    fn inverted_band_pays_nothing() {
        let bands = vec![band(dec!(100), Some(dec!(50)), dec!(0.1))];
        assert_eq!(band_details(dec!(500), &bands)[0].unwrap().tax_payable, dec!(0));
        assert_eq!(total_tax(dec!(500), &bands), dec!(0));
    }

    #[test]
    fn largest_income_saturates_instead_of_panicking() {
        let income = Income::parse("79228162514264337593543950335");
        assert_eq!(income, Income::Taxable(Decimal::MAX));

        let bands = vec![band(dec!(0), None, dec!(0.1))];
        let result = breakdown(income, &bands);
        let tax = result.details[0].unwrap().tax_payable;
        assert!(tax > dec!(7_900_000_000_000_000_000_000_000_000));
        assert_eq!(result.total, tax);

        let steep = vec![band(dec!(0), None, dec!(2)), band(dec!(0), None, dec!(2))];
        let result = breakdown(income, &steep);
        assert_eq!(result.details[0].unwrap().tax_payable, Decimal::MAX);
        assert_eq!(result.total, Decimal::MAX);
        assert_eq!(total_tax(Decimal::MAX, &steep), Decimal::MAX);
    }

    #[test]
    fn tax_payable_scale_normalized() {
        let details = band_details(dec!(50000), &resident_bands());
        assert_eq!(details[1].unwrap().tax_payable.to_string(), "5092");
        assert_eq!(details[2].unwrap().tax_payable.to_string(), "1625");

        let halves = vec![band(dec!(1), Some(dec!(1)), dec!(0.5)), band(dec!(2), None, dec!(0.5))];
        assert_eq!(total_tax(dec!(2), &halves).to_string(), "1");
        assert_eq!(breakdown(Income::Taxable(dec!(2)), &halves).total.to_string(), "1");
    }

    #[test]
    fn negative_income_degrades_to_zero() {
        let details = band_details(dec!(-5), &resident_bands());
        assert!(details.iter().flatten().all(|d| d.tax_payable == Decimal::ZERO));
    }

    #[test]
    fn band_details_idempotent() {
        let bands = resident_bands();
        assert_eq!(band_details(dec!(77777), &bands), band_details(dec!(77777), &bands));
    }

    #[test]
    fn zero_details_copy_band_fields() {
        let bands = vec![band(dec!(0), Some(dec!(18200)), dec!(0)), None, band(dec!(45001), None, dec!(0.325))];
        let details = zero_band_details(&bands);
        assert!(details[1].is_none());
        let top = details[2].unwrap();
        assert_eq!((top.start, top.end, top.rate), (dec!(45001), Limit::Unbounded, dec!(0.325)));
        assert_eq!(top.tax_payable, dec!(0));
    }

    #[test]
    fn invalid_income_takes_zero_path() {
        for input in ["0", "-5", "NaN", "abc"] {
            let result = breakdown(Income::parse(input), &resident_bands());
            assert_eq!(result.details, zero_band_details(&resident_bands()));
            assert_eq!(result.total, dec!(0));
        }
    }

    #[test]
    fn breakdown_totals_details() {
        let result = breakdown(Income::Taxable(dec!(50000)), &resident_bands());
        assert_eq!(result.total, dec!(6717));
        assert_eq!(result.details, band_details(dec!(50000), &resident_bands()));
    }

    #[test]
    fn effective_rate() {
        let income = Income::Taxable(dec!(50000));
        let result = breakdown(income, &resident_bands());
        assert_eq!(result.effective_rate(income), Some(dec!(0.13434)));
        assert_eq!(result.effective_rate(Income::Invalid), None);
    }

    #[test]
    fn effective_rate_overflow_is_none() {
        let income = Income::parse("0.0000000000000000000000000001");
        let result = breakdown(income, &[band(dec!(0), None, dec!(100))]);
        assert!(result.total >= dec!(100));
        assert_eq!(result.effective_rate(income), None);
    }
}
