//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments
//! - loads or generates admissions
//! - runs splits and baseline evaluation
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{BucketArgs, Command, ExperimentArgs, GenerateArgs, SweepArgs};
use crate::domain::{DataSource, ExperimentConfig};
use crate::error::AppError;
use crate::split::{SplitFractions, train_validate_test_split};

pub mod pipeline;

/// Entry point for the `los` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    crate::logging::init()?;

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Bucket(args) => handle_bucket(&args),
        Command::Split(args) => handle_split(&args),
        Command::Evaluate(args) => handle_evaluate(&args),
        Command::Sweep(args) => handle_sweep(&args),
        Command::Generate(args) => handle_generate(&args),
    }
}

fn handle_bucket(args: &BucketArgs) -> Result<(), AppError> {
    let categories = crate::risk::risk_scores(&args.values)?;
    print!("{}", crate::report::format_bucket_table(&args.values, &categories));
    Ok(())
}

fn handle_split(args: &ExperimentArgs) -> Result<(), AppError> {
    let config = experiment_config_from_args(args);
    let data = pipeline::load_data(&config.source)?;
    let dataset = pipeline::task_dataset(&data.dataset, config.task)?;

    let split = train_validate_test_split(&dataset, config.fractions, config.random_state)?;
    print!(
        "{}",
        crate::report::format_split_summary(&split.indices, config.random_state)
    );

    if let Some(path) = &config.export_assignments {
        crate::io::export::write_assignments_csv(path, &dataset, &split.indices)?;
        tracing::info!(path = %path.display(), "wrote partition assignments");
    }
    Ok(())
}

fn handle_evaluate(args: &ExperimentArgs) -> Result<(), AppError> {
    let config = experiment_config_from_args(args);
    let run = pipeline::run_experiment(&config)?;

    print!("{}", crate::report::format_experiment(&run.report));

    if let Some(path) = &config.export_assignments {
        crate::io::export::write_assignments_csv(path, &run.task_dataset, &run.split.indices)?;
    }
    if let Some(path) = &config.export_results {
        crate::io::results::write_report_json(path, &run.report)?;
        tracing::info!(path = %path.display(), "wrote report");
    }
    Ok(())
}

fn handle_sweep(args: &SweepArgs) -> Result<(), AppError> {
    let config = experiment_config_from_args(&args.experiment);
    let report = pipeline::run_seed_sweep(&config, &args.seeds)?;

    print!("{}", crate::report::format_sweep(&report));

    if let Some(path) = &config.export_results {
        crate::io::results::write_report_json(path, &report)?;
    }
    Ok(())
}

fn handle_generate(args: &GenerateArgs) -> Result<(), AppError> {
    let dataset = crate::data::generate_admissions(args.rows, args.seed)?;
    crate::io::export::write_admissions_csv(&args.out, &dataset)?;
    tracing::info!(rows = args.rows, seed = args.seed, path = %args.out.display(), "wrote synthetic admissions");
    Ok(())
}

pub fn experiment_config_from_args(args: &ExperimentArgs) -> ExperimentConfig {
    let source = match &args.data {
        Some(path) => DataSource::Csv {
            path: path.clone(),
            target_column: args.target.clone(),
        },
        None => DataSource::Synthetic {
            rows: args.rows,
            seed: args.data_seed,
        },
    };

    ExperimentConfig {
        source,
        task: args.task,
        metric: args.metric.unwrap_or_else(|| args.task.default_metric()),
        fractions: SplitFractions::new(args.train, args.validate, args.test),
        random_state: args.random_state,
        export_assignments: args.export_assignments.clone(),
        export_results: args.export_results.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    #[test]
    fn config_prefers_csv_when_given() {
        let cli = Cli::parse_from(["los", "evaluate", "--data", "adm.csv", "--target", "stay", "-s", "7"]);
        let crate::cli::Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        let config = experiment_config_from_args(&args);
        assert_eq!(
            config.source,
            DataSource::Csv {
                path: "adm.csv".into(),
                target_column: "stay".to_string()
            }
        );
        assert_eq!(config.random_state, 7);
    }

    #[test]
    fn config_defaults_to_synthetic() {
        let cli = Cli::parse_from(["los", "split", "--rows", "250", "--data-seed", "3"]);
        let crate::cli::Command::Split(args) = cli.command else {
            panic!("expected split");
        };
        let config = experiment_config_from_args(&args);
        assert_eq!(config.source, DataSource::Synthetic { rows: 250, seed: 3 });
        assert_eq!(config.fractions, SplitFractions::new(0.70, 0.15, 0.15));
        assert_eq!(config.metric, crate::domain::ScoringMetric::Rmse);
    }
}
