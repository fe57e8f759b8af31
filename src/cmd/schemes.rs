//! Schemes command - list configured schemes and their bands

use crate::cmd::format::{format_currency, format_limit, format_rate};
use crate::cmd::SchemeSource;
use crate::core::Scheme;
use clap::Args;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct SchemesCommand {
    #[command(flatten)]
    source: SchemeSource,

    /// Output the configuration as JSON (usable as a --schemes file)
    #[arg(long)]
    json: bool,
}

#[derive(Tabled)]
struct SchemeBandRow {
    #[tabled(rename = "#")]
    slot: usize,
    #[tabled(rename = "From")]
    start: String,
    #[tabled(rename = "To")]
    end: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

impl SchemesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let set = self.source.load()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&set.to_config())?);
            return Ok(());
        }

        println!();
        for (index, scheme) in set.schemes().iter().enumerate() {
            if index == 0 {
                println!("{} (baseline)", scheme.name);
            } else {
                println!("{}", scheme.name);
            }
            let table = Table::new(scheme_rows(scheme))
                .with(Style::rounded())
                .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
            println!();
        }
        Ok(())
    }
}

fn scheme_rows(scheme: &Scheme) -> Vec<SchemeBandRow> {
    scheme
        .bands
        .iter()
        .enumerate()
        .map(|(slot, band)| match band {
            Some(band) => SchemeBandRow {
                slot: slot + 1,
                start: format_currency(band.start),
                end: format_limit(&band.end),
                rate: format_rate(band.rate),
            },
            None => SchemeBandRow {
                slot: slot + 1,
                start: "-".to_string(),
                end: "-".to_string(),
                rate: "-".to_string(),
            },
        })
        .collect()
}
