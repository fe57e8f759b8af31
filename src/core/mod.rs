pub mod band;
pub mod calculator;
pub mod compare;
pub mod income;
pub mod scheme;

// Flat public surface for domain types and functions.
pub use band::{Band, Limit};
pub use calculator::{band_details, breakdown, total_tax, zero_band_details, Breakdown, TaxDetail};
pub use compare::{
    compare, compare_bands, BandComparison, Comparison, Direction, FieldComparison,
    SchemeComparison, TotalDelta, Verdict,
};
pub use income::Income;
pub use scheme::{ConfigError, Scheme, SchemeConfig, SchemeSet};
