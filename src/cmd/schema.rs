//! Schema command - print the expected scheme configuration format

use crate::core::{SchemeConfig, SchemeSet};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or example
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the schemes file
    JsonSchema,
    /// Example schemes file (the built-in schemes)
    Example,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::Example => self.print_example(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(SchemeConfig);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_example(&self) -> anyhow::Result<()> {
        let config = SchemeSet::australian_default().to_config();
        println!("{}", serde_json::to_string_pretty(&config)?);
        Ok(())
    }
}
