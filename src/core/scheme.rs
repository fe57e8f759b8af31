use super::band::{Band, Limit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no schemes configured")]
    Empty,
    #[error("invalid scheme configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scheme '{scheme}' band {index}: start {start} is negative")]
    NegativeStart {
        scheme: String,
        index: usize,
        start: Decimal,
    },
    #[error("scheme '{scheme}' band {index}: rate {rate} is negative")]
    NegativeRate {
        scheme: String,
        index: usize,
        rate: Decimal,
    },
    #[error("scheme '{scheme}' band {index}: end {end} is below start {start}")]
    InvertedBand {
        scheme: String,
        index: usize,
        start: Decimal,
        end: Decimal,
    },
    #[error("scheme '{scheme}' band {index}: starts at {start}, overlapping the previous band ending at {previous_end}")]
    Overlap {
        scheme: String,
        index: usize,
        start: Decimal,
        previous_end: Limit,
    },
}

/// Input root for scheme configuration JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemeConfig {
    /// Schemes in display order; the first is the baseline
    pub schemes: Vec<Scheme>,
}

/// A named, ordered collection of bands forming one tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scheme {
    /// Display label
    pub name: String,
    /// Bands ordered by ascending start; `null` marks an absent slot kept for row alignment
    pub bands: Vec<Option<Band>>,
}

impl Scheme {
    pub fn new(name: impl Into<String>, bands: Vec<Option<Band>>) -> Self {
        Scheme {
            name: name.into(),
            bands,
        }
    }

    /// Check band ordering, overlap and sign constraints.
    ///
    /// Absent slots are skipped; ordering is checked between consecutive present bands.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut previous_end: Option<Limit> = None;
        for (index, band) in self.bands.iter().enumerate() {
            let Some(band) = band else { continue };
            if band.start < Decimal::ZERO {
                return Err(ConfigError::NegativeStart {
                    scheme: self.name.clone(),
                    index,
                    start: band.start,
                });
            }
            if band.rate < Decimal::ZERO {
                return Err(ConfigError::NegativeRate {
                    scheme: self.name.clone(),
                    index,
                    rate: band.rate,
                });
            }
            if let Limit::Finite(end) = band.end {
                if end < band.start {
                    return Err(ConfigError::InvertedBand {
                        scheme: self.name.clone(),
                        index,
                        start: band.start,
                        end,
                    });
                }
            }
            if let Some(previous_end) = previous_end {
                if previous_end >= Limit::Finite(band.start) {
                    return Err(ConfigError::Overlap {
                        scheme: self.name.clone(),
                        index,
                        start: band.start,
                        previous_end,
                    });
                }
            }
            previous_end = Some(band.end);
        }
        Ok(())
    }
}

/// Immutable set of schemes for a session. The first scheme is the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeSet {
    schemes: Vec<Scheme>,
}

impl SchemeSet {
    pub fn new(schemes: Vec<Scheme>) -> Result<Self, ConfigError> {
        if schemes.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(SchemeSet { schemes })
    }

    /// Read a scheme set from configuration JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let config: SchemeConfig = serde_json::from_reader(reader)?;
        Self::new(config.schemes)
    }

    pub fn baseline(&self) -> &Scheme {
        &self.schemes[0]
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Fail fast on malformed band lists. The calculator itself never validates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schemes.iter().try_for_each(Scheme::validate)
    }

    pub fn to_config(&self) -> SchemeConfig {
        SchemeConfig {
            schemes: self.schemes.clone(),
        }
    }

    /// Australian resident rates: 2023-24 against the original and revised stage 3 cuts.
    pub fn australian_default() -> Self {
        let band = |start, end, rate| Some(Band::new(start, end, rate));
        SchemeSet {
            schemes: vec![
                Scheme::new(
                    "2023-24 Rates",
                    vec![
                        band(dec!(0), Some(dec!(18200)), dec!(0)),
                        band(dec!(18201), Some(dec!(45000)), dec!(0.19)),
                        band(dec!(45001), Some(dec!(120000)), dec!(0.325)),
                        band(dec!(120001), Some(dec!(180000)), dec!(0.37)),
                        band(dec!(180001), None, dec!(0.45)),
                    ],
                ),
                Scheme::new(
                    "Stage 3 (Original)",
                    vec![
                        band(dec!(0), Some(dec!(18200)), dec!(0)),
                        band(dec!(18201), Some(dec!(45000)), dec!(0.19)),
                        band(dec!(45001), Some(dec!(200000)), dec!(0.30)),
                        None,
                        band(dec!(200001), None, dec!(0.45)),
                    ],
                ),
                Scheme::new(
                    "Stage 3 (Revised)",
                    vec![
                        band(dec!(0), Some(dec!(18200)), dec!(0)),
                        band(dec!(18201), Some(dec!(45000)), dec!(0.16)),
                        band(dec!(45001), Some(dec!(135000)), dec!(0.30)),
                        band(dec!(135001), Some(dec!(190000)), dec!(0.37)),
                        band(dec!(190001), None, dec!(0.45)),
                    ],
                ),
            ],
        }
    }
}
