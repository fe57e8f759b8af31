//! Compare command - per-band tax for each scheme with differences from the baseline

use crate::cmd::format::{
    format_currency, format_difference, format_limit, format_percent, format_rate, verdict_mark,
};
use crate::cmd::{write_csv, SchemeSource};
use crate::core::{compare, BandComparison, Comparison, Income, Limit, TaxDetail, Verdict};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Taxable income (e.g. 50000 or "$50,000"). Anything not above zero shows empty bands
    #[arg(allow_hyphen_values = true)]
    income: String,

    #[command(flatten)]
    source: SchemeSource,

    /// Output as JSON instead of formatted tables
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output one CSV row per band slot
    #[arg(long)]
    csv: bool,
}

#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Tax Payable")]
    tax_payable: String,
}

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Scheme")]
    scheme: String,
    #[tabled(rename = "Total Tax")]
    total: String,
    #[tabled(rename = "Difference")]
    difference: String,
    #[tabled(rename = "Effective Rate")]
    effective_rate: String,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    scheme: &'a str,
    slot: usize,
    start: Option<Decimal>,
    end: Option<Decimal>,
    /// Empty for an absent slot
    unbounded: Option<bool>,
    rate: Option<Decimal>,
    tax_payable: Option<Decimal>,
    start_verdict: Option<Verdict>,
    end_verdict: Option<Verdict>,
    rate_verdict: Option<Verdict>,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schemes = self.source.load()?;
        let income = Income::parse(&self.income);
        if !income.is_valid() {
            log::warn!("income '{}' is not a positive number, showing bands only", self.income);
        }

        let comparison = compare(income, &schemes);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        } else if self.csv {
            write_csv(csv_rows(&comparison), io::stdout())?;
        } else {
            print_tables(&comparison);
        }
        Ok(())
    }
}

/// Band cell text: `$start - $end (rate)` with verdict marks on changed fields
pub fn band_label(detail: &TaxDetail, cmp: Option<&BandComparison>) -> String {
    let mark = |f: fn(&BandComparison) -> Verdict| cmp.map_or("", |c| verdict_mark(f(c)));
    format!(
        "{}{} - {}{} {}{}",
        format_currency(detail.start),
        mark(|c| c.start.verdict),
        format_limit(&detail.end),
        mark(|c| c.end.verdict),
        format_rate(detail.rate),
        mark(|c| c.rate.verdict),
    )
}

fn print_tables(comparison: &Comparison) {
    println!();
    match comparison.income.amount() {
        Some(amount) => println!("INCOME {}", format_currency(amount)),
        None => println!("NO VALID INCOME (showing band ranges only)"),
    }
    println!();

    for scheme in &comparison.schemes {
        let rows: Vec<BandRow> = scheme
            .breakdown
            .details
            .iter()
            .enumerate()
            .map(|(index, detail)| match detail {
                Some(detail) => BandRow {
                    band: band_label(detail, scheme.bands.get(index).and_then(Option::as_ref)),
                    tax_payable: format_currency(detail.tax_payable),
                },
                None => BandRow {
                    band: String::new(),
                    tax_payable: String::new(),
                },
            })
            .collect();

        println!("{}", scheme.name);
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
    }

    let totals: Vec<TotalRow> = comparison
        .schemes
        .iter()
        .map(|s| TotalRow {
            scheme: s.name.clone(),
            total: format_currency(s.breakdown.total),
            difference: format_difference(&s.total_delta),
            effective_rate: s
                .breakdown
                .effective_rate(comparison.income)
                .map_or(String::new(), format_percent),
        })
        .collect();

    println!("TOTALS");
    let table = Table::new(totals)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
    println!("\u{2713} better than baseline, \u{2717} worse than baseline");
}

fn csv_rows(comparison: &Comparison) -> Vec<CsvRow<'_>> {
    comparison
        .schemes
        .iter()
        .flat_map(|scheme| {
            scheme
                .breakdown
                .details
                .iter()
                .enumerate()
                .map(move |(slot, detail)| {
                    let cmp = scheme.bands.get(slot).copied().flatten();
                    CsvRow {
                        scheme: &scheme.name,
                        slot,
                        start: detail.map(|d| d.start),
                        end: detail.and_then(|d| d.end.finite()),
                        unbounded: detail.map(|d| d.end == Limit::Unbounded),
                        rate: detail.map(|d| d.rate),
                        tax_payable: detail.map(|d| d.tax_payable),
                        start_verdict: cmp.map(|c| c.start.verdict),
                        end_verdict: cmp.map(|c| c.end.verdict),
                        rate_verdict: cmp.map(|c| c.rate.verdict),
                    }
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SchemeSet;
    use rust_decimal_macros::dec;

    #[test]
    fn baseline_label_has_no_marks() {
        let comparison = compare(Income::Taxable(dec!(50000)), &SchemeSet::australian_default());
        let baseline = comparison.baseline();
        let label = band_label(baseline.breakdown.details[1].as_ref().unwrap(), None);
        assert_eq!(label, "$18,201.00 - $45,000.00 (19.0\u{00A2})");
    }

    #[test]
    fn changed_fields_marked() {
        let comparison = compare(Income::Taxable(dec!(50000)), &SchemeSet::australian_default());
        let revised = &comparison.schemes[2];
        let label = band_label(
            revised.breakdown.details[2].as_ref().unwrap(),
            revised.bands[2].as_ref(),
        );
        assert_eq!(label, "$45,001.00 - $135,000.00 \u{2713} (30.0\u{00A2}) \u{2713}");
    }

    #[test]
    fn csv_rows_cover_every_slot() {
        let comparison = compare(Income::Taxable(dec!(50000)), &SchemeSet::australian_default());
        let rows = csv_rows(&comparison);
        assert_eq!(rows.len(), 15);

        let absent = rows
            .iter()
            .find(|r| r.scheme == "Stage 3 (Original)" && r.slot == 3)
            .unwrap();
        assert!(absent.start.is_none());
        assert!(absent.unbounded.is_none());
        assert!(absent.tax_payable.is_none());

        let top = rows.iter().find(|r| r.scheme == "2023-24 Rates" && r.slot == 4).unwrap();
        assert!(top.end.is_none());
        assert_eq!(top.unbounded, Some(true));

        let capped = rows.iter().find(|r| r.scheme == "2023-24 Rates" && r.slot == 3).unwrap();
        assert_eq!(capped.end, Some(dec!(180000)));
        assert_eq!(capped.unbounded, Some(false));
        assert!(top.rate_verdict.is_none());
    }
}
