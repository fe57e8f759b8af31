pub mod compare;
pub mod format;
pub mod html;
pub mod schema;
pub mod schemes;

use crate::core::SchemeSet;
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Where scheme configuration comes from
#[derive(Args, Debug)]
pub struct SchemeSource {
    /// JSON file of schemes ("-" for stdin). Uses the built-in Australian schemes if omitted
    #[arg(short, long)]
    schemes: Option<PathBuf>,

    /// Skip band ordering and overlap checks
    #[arg(long)]
    no_validate: bool,
}

impl SchemeSource {
    pub fn load(&self) -> anyhow::Result<SchemeSet> {
        let set = match self.schemes.as_deref() {
            Some(path) => read_schemes(path)?,
            None => {
                log::debug!("using built-in schemes");
                SchemeSet::australian_default()
            }
        };
        if !self.no_validate {
            set.validate()?;
        }
        log::info!("loaded {} scheme(s), baseline '{}'", set.len(), set.baseline().name);
        Ok(set)
    }
}

/// Read scheme configuration JSON from a file (or stdin with "-")
pub fn read_schemes(path: &Path) -> anyhow::Result<SchemeSet> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        let file = File::open(path)
            .with_context(|| format!("failed to open schemes file {}", path.display()))?;
        let set = SchemeSet::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to read schemes from {}", path.display()))?;
        Ok(set)
    }
}

fn read_from_stdin() -> anyhow::Result<SchemeSet> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a schemes file or pipe JSON to stdin.");
    }

    Ok(SchemeSet::from_reader(io::Cursor::new(buffer))?)
}

pub fn write_csv<I, R, W>(records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: io::Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records.into_iter() {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
