//! Command-line parsing for the length-of-stay baseline tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the splitting/evaluation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{ScoringMetric, Task};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "los", version, about = "Length-of-stay risk bucketing and baseline benchmarking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Map length-of-stay values (days) to risk categories 1-5.
    Bucket(BucketArgs),
    /// Split a dataset into train/validate/test and print partition sizes.
    Split(ExperimentArgs),
    /// Split, fit baselines, and report validation/test scores.
    Evaluate(ExperimentArgs),
    /// Repeat `evaluate` across several seeds (in parallel).
    Sweep(SweepArgs),
    /// Write a synthetic admissions CSV.
    Generate(GenerateArgs),
}

#[derive(Debug, Args, Clone)]
pub struct BucketArgs {
    /// Length-of-stay values in days.
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

/// Common options for splitting and evaluation.
#[derive(Debug, Args, Clone)]
pub struct ExperimentArgs {
    /// Admissions CSV. When omitted, synthetic admissions are generated.
    #[arg(long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Length-of-stay column in the CSV.
    #[arg(long, default_value = "los")]
    pub target: String,

    /// Number of synthetic admissions (ignored with `--data`).
    #[arg(long, default_value_t = 1000)]
    pub rows: usize,

    /// Seed for synthetic data generation (ignored with `--data`).
    #[arg(long, default_value_t = 1)]
    pub data_seed: u64,

    /// Regression on LoS, or classification on the risk category.
    #[arg(long, value_enum, default_value_t = Task::Regression)]
    pub task: Task,

    /// Scoring metric; defaults to rmse for regression, f1-weighted for classification.
    #[arg(long, value_enum)]
    pub metric: Option<ScoringMetric>,

    /// Training fraction.
    #[arg(long, default_value_t = 0.70)]
    pub train: f64,

    /// Validation fraction.
    #[arg(long, default_value_t = 0.15)]
    pub validate: f64,

    /// Test fraction.
    #[arg(long, default_value_t = 0.15)]
    pub test: f64,

    /// Random state for the split (same value, same partitions).
    #[arg(short = 's', long = "seed", default_value_t = 42)]
    pub random_state: u64,

    /// Write `row,id,partition` for every input row.
    #[arg(long, value_name = "CSV")]
    pub export_assignments: Option<PathBuf>,

    /// Write the run report as JSON.
    #[arg(long, value_name = "JSON")]
    pub export_results: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Comma-separated split seeds.
    #[arg(long, value_delimiter = ',', default_value = "0,1,2,3,4,5,6,7,8,9")]
    pub seeds: Vec<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Number of admissions.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub rows: usize,

    /// Generator seed.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,
}
