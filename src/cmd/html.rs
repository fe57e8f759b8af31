//! HTML report generation
//!
//! Generates a self-contained HTML file with one table per scheme and a totals table.

use crate::cmd::format::{format_currency, format_difference, format_limit, format_rate};
use crate::cmd::SchemeSource;
use crate::core::{compare, Comparison, Direction, FieldComparison, Income, SchemeComparison, Verdict};
use clap::Args;
use std::path::PathBuf;

const TEMPLATE: &str = include_str!("html/report.html");
const CSS: &str = include_str!("html/report.css");

#[derive(Args, Debug)]
pub struct HtmlCommand {
    /// Taxable income (e.g. 50000). Anything not above zero shows empty bands
    #[arg(allow_hyphen_values = true)]
    income: String,

    #[command(flatten)]
    source: SchemeSource,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl HtmlCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let schemes = self.source.load()?;
        let comparison = compare(Income::parse(&self.income), &schemes);
        let html = generate(&comparison);

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &html)?;
            println!("HTML report written to: {}", output_path.display());
        } else {
            let temp_path = std::env::temp_dir().join("taxbands-report.html");
            std::fs::write(&temp_path, &html)?;
            opener::open(&temp_path)?;
            println!("Opened HTML report in browser: {}", temp_path.display());
        }

        Ok(())
    }
}

/// Render the comparison as a complete HTML document
pub fn generate(comparison: &Comparison) -> String {
    let income = match comparison.income.amount() {
        Some(amount) => format!("Income: {}", format_currency(amount)),
        None => "Enter a positive income to calculate tax.".to_string(),
    };

    let tables: String = comparison
        .schemes
        .iter()
        .enumerate()
        .map(|(index, scheme)| scheme_table(index, scheme))
        .collect();

    let totals: String = comparison.schemes.iter().map(total_row).collect();

    TEMPLATE
        .replace("__CSS__", CSS)
        .replace("__INCOME__", &escape(&income))
        .replace("__TABLES__", &tables)
        .replace("__TOTALS__", &totals)
}

fn scheme_table(index: usize, scheme: &SchemeComparison) -> String {
    let mut out = format!(
        concat!(
            "<table id=\"resultsTable{id}\" class=\"flex-item\">\n",
            "<colgroup><col style=\"width: 75%;\"><col style=\"width: 25%;\"></colgroup>\n",
            "<thead><tr><th colspan=\"2\">{name}</th></tr><tr><th>Band</th><th>Tax Payable</th></tr></thead>\n",
            "<tbody id=\"resultsBody{id}\">\n",
        ),
        id = index + 1,
        name = escape(&scheme.name),
    );

    for (slot, detail) in scheme.breakdown.details.iter().enumerate() {
        let Some(detail) = detail else {
            out.push_str("<tr><td></td><td></td></tr>\n");
            continue;
        };
        let cmp = scheme.bands.get(slot).copied().flatten();
        out.push_str(&format!(
            "<tr><td>{} - {} {}</td><td>{}</td></tr>\n",
            span(&format_currency(detail.start), cmp.map(|c| c.start)),
            span(&format_limit(&detail.end), cmp.map(|c| c.end)),
            span(&format_rate(detail.rate), cmp.map(|c| c.rate)),
            format_currency(detail.tax_payable),
        ));
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

fn total_row(scheme: &SchemeComparison) -> String {
    let class = match scheme.total_delta.direction {
        Direction::Higher => "difference-positive",
        Direction::Lower => "difference-negative",
        Direction::Equal => "",
    };
    let difference = format_difference(&scheme.total_delta);
    format!(
        "<tr><td>{}</td><td>{}<span class=\"{}\">{}</span></td></tr>\n",
        escape(&scheme.name),
        format_currency(scheme.breakdown.total),
        class,
        if difference.is_empty() {
            difference
        } else {
            format!(" {}", difference)
        },
    )
}

fn span(text: &str, cmp: Option<FieldComparison>) -> String {
    match cmp.map(|c| c.verdict) {
        Some(Verdict::Favorable) => format!(r#"<span class="favorable">{}</span>"#, escape(text)),
        Some(Verdict::Unfavorable) => format!(r#"<span class="unfavorable">{}</span>"#, escape(text)),
        Some(Verdict::Neutral) | None => format!("<span>{}</span>", escape(text)),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
