//! Fit an estimator on one partition and score it on another.

use nalgebra::DVector;

use crate::domain::{Dataset, ScoringMetric};
use crate::error::AppError;
use crate::metrics::{MetricError, f1_weighted, rmse};
use crate::models::Estimator;
use crate::risk::clip_non_negative;

/// A fitted estimator and its scores on the data it was fitted and tested on.
pub struct TrainedModel {
    pub estimator: Box<dyn Estimator>,
    pub scoring_metric: ScoringMetric,
    pub train_metric: f64,
    pub test_metric: f64,
    /// Clipped predictions for the test rows, aligned with the test targets.
    pub test_predictions: DVector<f64>,
}

impl std::fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedModel")
            .field("estimator", &self.estimator.name())
            .field("scoring_metric", &self.scoring_metric)
            .field("train_metric", &self.train_metric)
            .field("test_metric", &self.test_metric)
            .finish()
    }
}

/// Score predictions against targets.
///
/// For `F1Weighted` both sides are rounded to the nearest integer label.
pub fn score(metric: ScoringMetric, y_true: &DVector<f64>, y_pred: &DVector<f64>) -> Result<f64, MetricError> {
    match metric {
        ScoringMetric::Rmse => rmse(y_true.as_slice(), y_pred.as_slice()),
        ScoringMetric::F1Weighted => {
            let truth: Vec<i64> = y_true.iter().map(|v| v.round() as i64).collect();
            let pred: Vec<i64> = y_pred.iter().map(|v| v.round() as i64).collect();
            f1_weighted(&truth, &pred)
        }
    }
}

/// Predictions with negatives clipped to zero.
pub fn predict_clipped(estimator: &dyn Estimator, data: &Dataset) -> Result<DVector<f64>, AppError> {
    let mut pred = estimator.predict(&data.features)?;
    clip_non_negative(pred.as_mut_slice());
    Ok(pred)
}

/// Fit `estimator` on `train`, then score it on both `train` and `test`.
pub fn train_and_test_model(
    mut estimator: Box<dyn Estimator>,
    train: &Dataset,
    test: &Dataset,
    scoring_metric: ScoringMetric,
) -> Result<TrainedModel, AppError> {
    estimator.fit(&train.features, &train.targets)?;

    let preds_train = predict_clipped(estimator.as_ref(), train)?;
    let preds_test = predict_clipped(estimator.as_ref(), test)?;

    let train_metric = score(scoring_metric, &train.targets, &preds_train)?;
    let test_metric = score(scoring_metric, &test.targets, &preds_test)?;

    tracing::debug!(
        estimator = estimator.name(),
        metric = scoring_metric.display_name(),
        train_metric,
        test_metric,
        "trained and tested"
    );

    Ok(TrainedModel {
        estimator,
        scoring_metric,
        train_metric,
        test_metric,
        test_predictions: preds_test,
    })
}

#[cfg(test)]
mod tests {
    use nalgebra::DMatrix;

    use super::*;
    use crate::domain::TargetKind;
    use crate::models::{LinearRegressor, MajorityClassifier, MeanRegressor};

    fn dataset(xs: &[f64], ys: &[f64], target: TargetKind) -> Dataset {
        let n = xs.len();
        Dataset::new(
            (0..n).map(|i| i.to_string()).collect(),
            vec!["x".to_string()],
            DMatrix::from_column_slice(n, 1, xs),
            DVector::from_row_slice(ys),
            target,
        )
        .unwrap()
    }

    #[test]
    fn predictions_are_clipped_before_scoring() {
        // y = x - 5 fitted exactly; negative predictions clip to 0.
        let train = dataset(&[5.0, 6.0, 7.0, 8.0], &[0.0, 1.0, 2.0, 3.0], TargetKind::LengthOfStay);
        let test = dataset(&[0.0, 10.0], &[0.0, 5.0], TargetKind::LengthOfStay);

        let model = train_and_test_model(Box::new(LinearRegressor::default()), &train, &test, ScoringMetric::Rmse).unwrap();
        assert!(model.train_metric < 1e-8);
        assert!(model.test_metric < 1e-8);
        assert_eq!(model.test_predictions[0], 0.0);
        assert_eq!(model.estimator.name(), "linear");
    }

    #[test]
    fn mean_regressor_rmse() {
        let train = dataset(&[0.0, 0.0], &[2.0, 4.0], TargetKind::LengthOfStay);
        let test = dataset(&[0.0, 0.0], &[1.0, 5.0], TargetKind::LengthOfStay);
        let model = train_and_test_model(Box::new(MeanRegressor::default()), &train, &test, ScoringMetric::Rmse).unwrap();
        assert!((model.train_metric - 1.0).abs() < 1e-12);
        assert!((model.test_metric - 2.0).abs() < 1e-12);
    }

    #[test]
    fn classification_uses_weighted_f1() {
        let train = dataset(&[0.0; 5], &[1.0, 1.0, 1.0, 2.0, 5.0], TargetKind::RiskCategory);
        let test = dataset(&[0.0; 2], &[1.0, 2.0], TargetKind::RiskCategory);
        let model =
            train_and_test_model(Box::new(MajorityClassifier::default()), &train, &test, ScoringMetric::F1Weighted)
                .unwrap();
        // Test: class 1 -> p=0.5, r=1, f1=2/3 (support 1); class 2 -> 0.
        assert!((model.test_metric - 1.0 / 3.0).abs() < 1e-12);
    }
}
