//! Experiment reports and their terminal formatting.

use serde::{Deserialize, Serialize};

use crate::domain::{ExperimentConfig, ScoringMetric};
use crate::fit::{BaselineResult, SeedOutcome};

pub mod format;

pub use format::*;

/// Row counts of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSizes {
    pub train: usize,
    pub validate: usize,
    pub test: usize,
}

impl From<(usize, usize, usize)> for PartitionSizes {
    fn from((train, validate, test): (usize, usize, usize)) -> Self {
        Self { train, validate, test }
    }
}

/// Everything a single `los evaluate` run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub tool: String,
    pub config: ExperimentConfig,
    pub metric: ScoringMetric,
    pub rows: usize,
    pub rows_skipped: usize,
    pub sizes: PartitionSizes,
    /// Rows per risk category (1..=5) across the whole dataset.
    pub category_counts: [usize; 5],
    pub results: Vec<BaselineResult>,
    /// Name of the baseline with the best validation score.
    pub best: Option<String>,
}

/// Per-seed outcomes of a `los sweep` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub tool: String,
    pub config: ExperimentConfig,
    pub metric: ScoringMetric,
    pub rows: usize,
    pub outcomes: Vec<SeedOutcome>,
}

impl SweepReport {
    /// True when every seed produced the same partition sizes.
    pub fn sizes_are_seed_invariant(&self) -> bool {
        let mut sizes = self
            .outcomes
            .iter()
            .map(|o| (o.train_rows, o.validate_rows, o.test_rows));
        match sizes.next() {
            Some(first) => sizes.all(|s| s == first),
            None => true,
        }
    }
}
