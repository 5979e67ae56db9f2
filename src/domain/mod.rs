//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - configuration enums (`Task`, `ScoringMetric`, `DataSource`)
//! - the ordinal `RiskCategory`
//! - row-aligned admission data (`Observation`, `Dataset`)

pub mod dataset;
pub mod types;

pub use dataset::*;
pub use types::*;
