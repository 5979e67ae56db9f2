//! Shared experiment pipeline used by the `evaluate` and `sweep` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load/generate -> (risk targets) -> three-way split -> baselines -> report

use crate::data::generate_admissions;
use crate::domain::{DataSource, Dataset, ExperimentConfig, Task};
use crate::error::AppError;
use crate::fit::{best_by_validation, evaluate_baselines, sweep_seeds};
use crate::io::ingest::{IngestOptions, load_admissions};
use crate::models::baselines_for;
use crate::report::{ExperimentReport, SweepReport};
use crate::split::{ThreeWaySplit, train_validate_test_split};

/// Dataset as loaded, before any task-specific target transform.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub rows_skipped: usize,
}

/// All computed outputs of a single `los evaluate` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: LoadedData,
    /// Dataset the split was taken from (risk targets for classification).
    pub task_dataset: Dataset,
    pub split: ThreeWaySplit,
    pub report: ExperimentReport,
}

/// Load the configured data source.
pub fn load_data(source: &DataSource) -> Result<LoadedData, AppError> {
    match source {
        DataSource::Csv { path, target_column } => {
            let options = IngestOptions {
                target_column: target_column.clone(),
                ..IngestOptions::default()
            };
            let ingested = load_admissions(path, &options)?;
            Ok(LoadedData {
                dataset: ingested.dataset,
                rows_skipped: ingested.row_errors.len(),
            })
        }
        DataSource::Synthetic { rows, seed } => Ok(LoadedData {
            dataset: generate_admissions(*rows, *seed)?,
            rows_skipped: 0,
        }),
    }
}

/// Apply the task's target transform.
pub fn task_dataset(dataset: &Dataset, task: Task) -> Result<Dataset, AppError> {
    match task {
        Task::Regression => Ok(dataset.clone()),
        Task::Classification => Ok(dataset.with_risk_targets()?),
    }
}

/// Execute the full evaluation pipeline and return the computed outputs.
pub fn run_experiment(config: &ExperimentConfig) -> Result<RunOutput, AppError> {
    let data = load_data(&config.source)?;
    run_experiment_with_data(config, data)
}

/// Execute the pipeline on already-loaded data.
pub fn run_experiment_with_data(config: &ExperimentConfig, data: LoadedData) -> Result<RunOutput, AppError> {
    let metric = config.metric;
    let category_counts = data.dataset.with_risk_targets()?.category_counts();
    let task_dataset = task_dataset(&data.dataset, config.task)?;

    let split = train_validate_test_split(&task_dataset, config.fractions, config.random_state)?;
    let results = evaluate_baselines(baselines_for(config.task), &split, metric)?;
    let best = best_by_validation(&results).map(|r| r.estimator.clone());

    let report = ExperimentReport {
        tool: "los".to_string(),
        config: config.clone(),
        metric,
        rows: task_dataset.n_rows(),
        rows_skipped: data.rows_skipped,
        sizes: split.indices.sizes().into(),
        category_counts,
        results,
        best,
    };

    Ok(RunOutput {
        data,
        task_dataset,
        split,
        report,
    })
}

/// Run the pipeline once per seed (in parallel) on a single load of the data.
pub fn run_seed_sweep(config: &ExperimentConfig, seeds: &[u64]) -> Result<SweepReport, AppError> {
    if seeds.is_empty() {
        return Err(AppError::new(2, "Seed sweep needs at least one seed."));
    }

    let data = load_data(&config.source)?;
    let dataset = task_dataset(&data.dataset, config.task)?;
    let metric = config.metric;

    let outcomes = sweep_seeds(
        seeds,
        config.fractions,
        metric,
        |fractions, seed| Ok(train_validate_test_split(&dataset, fractions, seed)?),
        || baselines_for(config.task),
    )?;

    Ok(SweepReport {
        tool: "los".to_string(),
        config: config.clone(),
        metric,
        rows: dataset.n_rows(),
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::SplitFractions;

    fn config(task: Task, random_state: u64) -> ExperimentConfig {
        ExperimentConfig {
            source: DataSource::Synthetic { rows: 1000, seed: 11 },
            task,
            metric: task.default_metric(),
            fractions: SplitFractions::new(0.70, 0.15, 0.15),
            random_state,
            export_assignments: None,
            export_results: None,
        }
    }

    #[test]
    fn regression_run_is_reproducible() {
        let a = run_experiment(&config(Task::Regression, 42)).unwrap();
        let b = run_experiment(&config(Task::Regression, 42)).unwrap();

        assert_eq!(a.report.sizes.train, 700);
        assert_eq!(a.report.sizes.validate, 150);
        assert_eq!(a.report.sizes.test, 150);
        assert_eq!(a.split.indices, b.split.indices);
        assert_eq!(a.report, b.report);
        assert_eq!(a.report.category_counts.iter().sum::<usize>(), 1000);
    }

    #[test]
    fn classification_run_uses_risk_targets() {
        let out = run_experiment(&config(Task::Classification, 7)).unwrap();
        assert_eq!(out.report.metric, crate::domain::ScoringMetric::F1Weighted);
        assert!(out.task_dataset.targets.iter().all(|t| (1.0..=5.0).contains(t)));
        assert_eq!(out.report.results[0].estimator, "majority");
    }

    #[test]
    fn sweep_reports_seed_invariant_sizes() {
        let report = run_seed_sweep(&config(Task::Regression, 0), &[1, 2, 3]).unwrap();
        assert_eq!(report.outcomes.len(), 3);
        assert!(report.sizes_are_seed_invariant());
        assert!(run_seed_sweep(&config(Task::Regression, 0), &[]).is_err());
    }
}
