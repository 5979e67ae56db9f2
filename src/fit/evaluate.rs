//! Validate-then-refit evaluation of baselines over a three-way split.
//!
//! For each estimator:
//!
//! 1. fit on train, score on validate (model selection signal)
//! 2. refit on train + validate, score on test (reported generalisation)
//! 3. for length-of-stay targets, bucket test predictions into risk
//!    categories and report agreement with the true categories

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{ScoringMetric, TargetKind};
use crate::error::AppError;
use crate::metrics::risk_agreement;
use crate::models::Estimator;
use crate::split::{SplitFractions, ThreeWaySplit};

use super::train::train_and_test_model;

/// Scores for one baseline on one split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineResult {
    pub estimator: String,
    pub metric: ScoringMetric,
    pub train_score: f64,
    pub validate_score: f64,
    /// Score on train + validate after refitting.
    pub refit_score: f64,
    pub test_score: f64,
    /// Weighted F1 of bucketed test predictions (length-of-stay targets only).
    pub test_risk_agreement: Option<f64>,
}

/// Evaluate one estimator on `split` with the validate-then-refit protocol.
pub fn evaluate_baseline(
    estimator: Box<dyn Estimator>,
    split: &ThreeWaySplit,
    metric: ScoringMetric,
) -> Result<BaselineResult, AppError> {
    let name = estimator.name().to_string();

    let validated = train_and_test_model(estimator, &split.train, &split.validate, metric)?;

    let combined = split.train_validate()?;
    let refit = train_and_test_model(validated.estimator, &combined, &split.test, metric)?;

    let test_risk_agreement = match split.test.target {
        TargetKind::LengthOfStay => Some(risk_agreement(
            split.test.targets.as_slice(),
            refit.test_predictions.as_slice(),
        )?),
        TargetKind::RiskCategory => None,
    };

    tracing::info!(
        estimator = %name,
        metric = metric.display_name(),
        validate = validated.test_metric,
        test = refit.test_metric,
        "evaluated baseline"
    );

    Ok(BaselineResult {
        estimator: name,
        metric,
        train_score: validated.train_metric,
        validate_score: validated.test_metric,
        refit_score: refit.train_metric,
        test_score: refit.test_metric,
        test_risk_agreement,
    })
}

/// Evaluate several estimators on the same split, keeping input order.
pub fn evaluate_baselines(
    estimators: Vec<Box<dyn Estimator>>,
    split: &ThreeWaySplit,
    metric: ScoringMetric,
) -> Result<Vec<BaselineResult>, AppError> {
    estimators
        .into_iter()
        .map(|e| evaluate_baseline(e, split, metric))
        .collect()
}

/// Pick the best baseline by validation score.
pub fn best_by_validation(results: &[BaselineResult]) -> Option<&BaselineResult> {
    results.iter().min_by(|a, b| {
        let (x, y) = if a.metric.higher_is_better() {
            (b.validate_score, a.validate_score)
        } else {
            (a.validate_score, b.validate_score)
        };
        x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Partition sizes and baseline scores for one seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedOutcome {
    pub random_state: u64,
    pub train_rows: usize,
    pub validate_rows: usize,
    pub test_rows: usize,
    pub results: Vec<BaselineResult>,
}

/// Run split + evaluation for each seed in parallel.
///
/// `make_split` and `make_estimators` are called once per seed; results keep
/// the order of `seeds`.
pub fn sweep_seeds<S, E>(
    seeds: &[u64],
    fractions: SplitFractions,
    metric: ScoringMetric,
    make_split: S,
    make_estimators: E,
) -> Result<Vec<SeedOutcome>, AppError>
where
    S: Fn(SplitFractions, u64) -> Result<ThreeWaySplit, AppError> + Sync,
    E: Fn() -> Vec<Box<dyn Estimator>> + Sync,
{
    seeds
        .par_iter()
        .map(|&seed| {
            let split = make_split(fractions, seed)?;
            let (train_rows, validate_rows, test_rows) = split.indices.sizes();
            let results = evaluate_baselines(make_estimators(), &split, metric)?;
            Ok(SeedOutcome {
                random_state: seed,
                train_rows,
                validate_rows,
                test_rows,
                results,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::generate_admissions;
    use crate::domain::Task;
    use crate::models::baselines_for;
    use crate::split::train_validate_test_split;

    #[test]
    fn regression_baselines_report_risk_agreement() {
        let data = generate_admissions(400, 1).unwrap();
        let split = train_validate_test_split(&data, SplitFractions::default(), 42).unwrap();
        let results = evaluate_baselines(baselines_for(Task::Regression), &split, ScoringMetric::Rmse).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].estimator, "mean");
        assert_eq!(results[1].estimator, "linear");
        for r in &results {
            assert!(r.test_score.is_finite() && r.test_score >= 0.0);
            let agreement = r.test_risk_agreement.unwrap();
            assert!((0.0..=1.0).contains(&agreement));
        }

        // Features drive the synthetic stay, so OLS should beat the mean.
        let best = best_by_validation(&results).unwrap();
        assert_eq!(best.estimator, "linear");
    }

    #[test]
    fn classification_has_no_risk_agreement() {
        let data = generate_admissions(200, 2).unwrap().with_risk_targets().unwrap();
        let split = train_validate_test_split(&data, SplitFractions::default(), 3).unwrap();
        let results =
            evaluate_baselines(baselines_for(Task::Classification), &split, ScoringMetric::F1Weighted).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].test_risk_agreement.is_none());
        assert!((0.0..=1.0).contains(&results[0].test_score));
    }

    #[test]
    fn best_by_validation_respects_metric_direction() {
        let mk = |name: &str, metric, v| BaselineResult {
            estimator: name.to_string(),
            metric,
            train_score: 0.0,
            validate_score: v,
            refit_score: 0.0,
            test_score: 0.0,
            test_risk_agreement: None,
        };
        let rmse = [mk("a", ScoringMetric::Rmse, 3.0), mk("b", ScoringMetric::Rmse, 2.0)];
        assert_eq!(best_by_validation(&rmse).unwrap().estimator, "b");

        let f1 = [mk("a", ScoringMetric::F1Weighted, 0.3), mk("b", ScoringMetric::F1Weighted, 0.2)];
        assert_eq!(best_by_validation(&f1).unwrap().estimator, "a");
    }

    #[test]
    fn sweep_keeps_seed_order_and_sizes() {
        let data = generate_admissions(300, 5).unwrap();
        let seeds = [9, 1, 42, 7];
        let outcomes = sweep_seeds(
            &seeds,
            SplitFractions::default(),
            ScoringMetric::Rmse,
            |f, seed| Ok(train_validate_test_split(&data, f, seed)?),
            || baselines_for(Task::Regression),
        )
        .unwrap();

        let order: Vec<u64> = outcomes.iter().map(|o| o.random_state).collect();
        assert_eq!(order, seeds);
        for o in &outcomes {
            assert_eq!((o.train_rows, o.validate_rows, o.test_rows), (210, 45, 45));
        }
    }
}
