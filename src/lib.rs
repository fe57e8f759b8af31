//! Progressive income tax band calculation and scheme comparison.
//!
//! [`core`] holds the pure calculator and comparison policy; [`cmd`] renders
//! its results for the command line.

pub mod cmd;
pub mod core;
