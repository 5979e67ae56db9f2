//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during splitting and evaluation
//! - exported to JSON/CSV
//! - reloaded later for comparisons across runs

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::split::SplitFractions;

/// Ordinal risk of becoming a long-stayer, derived from length of stay.
///
/// The discriminant is the category code used as a classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RiskCategory {
    VeryLow = 1,
    Low = 2,
    Normal = 3,
    Elevated = 4,
    High = 5,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::VeryLow,
        RiskCategory::Low,
        RiskCategory::Normal,
        RiskCategory::Elevated,
        RiskCategory::High,
    ];

    /// Category code (1 = very low risk, 5 = high risk).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::VeryLow => "Very low risk",
            RiskCategory::Low => "Low risk",
            RiskCategory::Normal => "Normal risk",
            RiskCategory::Elevated => "Elevated risk",
            RiskCategory::High => "High risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the target vector of a dataset holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Length of stay in (possibly fractional) days.
    LengthOfStay,
    /// Risk category codes 1..=5 stored as `f64`.
    RiskCategory,
}

/// Which prediction problem an experiment solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Predict length of stay (days); scored with RMSE.
    Regression,
    /// Predict the risk category; scored with weighted F1.
    Classification,
}

impl Task {
    pub fn default_metric(self) -> ScoringMetric {
        match self {
            Task::Regression => ScoringMetric::Rmse,
            Task::Classification => ScoringMetric::F1Weighted,
        }
    }
}

/// Metric used to score a trained model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMetric {
    /// Root mean squared error (lower is better).
    Rmse,
    /// Support-weighted F1 over class labels (higher is better).
    F1Weighted,
}

impl ScoringMetric {
    pub fn display_name(self) -> &'static str {
        match self {
            ScoringMetric::Rmse => "rmse",
            ScoringMetric::F1Weighted => "f1_weighted",
        }
    }

    pub fn higher_is_better(self) -> bool {
        matches!(self, ScoringMetric::F1Weighted)
    }
}

impl FromStr for ScoringMetric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rmse" => Ok(ScoringMetric::Rmse),
            "f1_weighted" | "f1-weighted" => Ok(ScoringMetric::F1Weighted),
            other => Err(AppError::new(
                2,
                format!("Scoring metric incorrectly specified: '{other}' (expected rmse or f1_weighted)."),
            )),
        }
    }
}

/// Where the admissions extract comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    /// A CSV export; `target_column` holds the length of stay.
    Csv { path: PathBuf, target_column: String },
    /// Seeded synthetic admissions.
    Synthetic { rows: usize, seed: u64 },
}

/// A full experiment's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub source: DataSource,
    pub task: Task,
    pub metric: ScoringMetric,
    pub fractions: SplitFractions,
    pub random_state: u64,

    pub export_assignments: Option<PathBuf>,
    pub export_results: Option<PathBuf>,
}
