//! Reproducible dataset partitioning.
//!
//! Responsibilities:
//!
//! - validate requested fractions (`fractions`)
//! - seeded two-way shuffle split primitive (`shuffle`)
//! - chained train / validate / test split (`three_way`)

use thiserror::Error;

pub mod fractions;
pub mod shuffle;
pub mod three_way;

pub use fractions::*;
pub use shuffle::*;
pub use three_way::*;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SplitError {
    #[error(
        "Invalid split configuration: train={train}, validate={validate}, test={test} \
         (each must be in (0, 1) and they must sum to 1.0)."
    )]
    InvalidSplitConfiguration { train: f64, validate: f64, test: f64 },
    #[error("Cannot split an empty dataset.")]
    EmptyDataset,
}
