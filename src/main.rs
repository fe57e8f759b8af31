use clap::{Parser, Subcommand};
use taxbands::cmd::{
    compare::CompareCommand, html::HtmlCommand, schema::SchemaCommand, schemes::SchemesCommand,
};

#[derive(Parser, Debug)]
#[command(name = "taxbands", version, about = "Compare progressive income tax schemes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tax payable per band for each scheme, with differences from the baseline
    Compare(CompareCommand),
    /// List the configured schemes
    Schemes(SchemesCommand),
    /// Generate an HTML comparison report
    Html(HtmlCommand),
    /// Print the schemes file format
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compare(cmd) => cmd.exec(),
        Command::Schemes(cmd) => cmd.exec(),
        Command::Html(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
