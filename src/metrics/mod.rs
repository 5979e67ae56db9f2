//! Scoring metrics for regression and classification baselines.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::risk::{RiskError, risk_scores};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("Cannot score {truth} targets against {predicted} predictions.")]
    LengthMismatch { truth: usize, predicted: usize },
    #[error("Cannot score an empty set of predictions.")]
    Empty,
    #[error(transparent)]
    Risk(#[from] RiskError),
}

fn check_lengths(truth: usize, predicted: usize) -> Result<(), MetricError> {
    if truth != predicted {
        return Err(MetricError::LengthMismatch { truth, predicted });
    }
    if truth == 0 {
        return Err(MetricError::Empty);
    }
    Ok(())
}

/// Root mean squared error.
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> Result<f64, MetricError> {
    check_lengths(y_true.len(), y_pred.len())?;
    let sse: f64 = y_true.iter().zip(y_pred).map(|(t, p)| (t - p).powi(2)).sum();
    Ok((sse / y_true.len() as f64).sqrt())
}

/// Per-class counts needed for precision/recall.
#[derive(Debug, Default, Clone, Copy)]
struct ClassCounts {
    true_positive: usize,
    predicted: usize,
    support: usize,
}

/// F1 per label, averaged with weights equal to each label's true support.
///
/// Labels are the union of both sides. A label never predicted (or never
/// present) gets precision (or recall) 0 rather than an undefined value; labels
/// that only appear in predictions carry zero weight but still lower the scores
/// of the labels they were confused with.
pub fn f1_weighted<L: Ord + Copy>(y_true: &[L], y_pred: &[L]) -> Result<f64, MetricError> {
    check_lengths(y_true.len(), y_pred.len())?;

    let mut classes: BTreeMap<L, ClassCounts> = BTreeMap::new();
    for (&t, &p) in y_true.iter().zip(y_pred) {
        classes.entry(t).or_default().support += 1;
        classes.entry(p).or_default().predicted += 1;
        if t == p {
            classes.entry(t).or_default().true_positive += 1;
        }
    }

    let mut weighted = 0.0;
    for c in classes.values() {
        if c.support == 0 {
            continue;
        }
        let precision = ratio(c.true_positive, c.predicted);
        let recall = ratio(c.true_positive, c.support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        weighted += f1 * c.support as f64;
    }

    Ok(weighted / y_true.len() as f64)
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Weighted F1 after bucketing both length-of-stay vectors into risk categories.
///
/// Lets a regression model be compared with a risk classifier on equal terms.
pub fn risk_agreement(los_true: &[f64], los_pred: &[f64]) -> Result<f64, MetricError> {
    check_lengths(los_true.len(), los_pred.len())?;
    let truth = risk_scores(los_true)?;
    let pred = risk_scores(los_pred)?;
    f1_weighted(&truth, &pred)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rmse_matches_hand_computation() {
        let v = rmse(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 6.0]).unwrap();
        assert!(approx(v, 1.0));
        assert!(approx(rmse(&[5.0], &[5.0]).unwrap(), 0.0));
    }

    #[test]
    fn rmse_rejects_bad_shapes() {
        assert_eq!(
            rmse(&[1.0], &[1.0, 2.0]),
            Err(MetricError::LengthMismatch { truth: 1, predicted: 2 })
        );
        assert_eq!(rmse(&[], &[]), Err(MetricError::Empty));
    }

    #[test]
    fn f1_perfect_and_disjoint() {
        assert!(approx(f1_weighted(&[1, 2, 3, 3], &[1, 2, 3, 3]).unwrap(), 1.0));
        assert!(approx(f1_weighted(&[1, 1, 1], &[2, 2, 2]).unwrap(), 0.0));
    }

    #[test]
    fn f1_weighted_by_support() {
        // class 0: tp=1, pred=1, support=2 -> p=1, r=0.5, f1=2/3
        // class 1: tp=2, pred=3, support=2 -> p=2/3, r=1, f1=0.8
        let y_true = [0, 0, 1, 1];
        let y_pred = [0, 1, 1, 1];
        let expected = (2.0 / 3.0 * 2.0 + 0.8 * 2.0) / 4.0;
        assert!(approx(f1_weighted(&y_true, &y_pred).unwrap(), expected));
    }

    #[test]
    fn prediction_only_labels_carry_no_weight() {
        // class 1: tp=1, pred=1, support=2 -> f1 = 2/3; class 9 has no support.
        let v = f1_weighted(&[1, 1], &[1, 9]).unwrap();
        assert!(approx(v, 2.0 / 3.0));
    }

    #[test]
    fn risk_agreement_buckets_before_scoring() {
        // 6.2 and 7.0 both fall in category 2; 16 vs 14 differ (5 vs 4).
        let v = risk_agreement(&[6.2, 16.0], &[7.0, 14.0]).unwrap();
        // class 2: f1=1 (support 1); class 5: tp=0 -> f1=0 (support 1).
        assert!(approx(v, 0.5));

        assert!(matches!(
            risk_agreement(&[1.0], &[f64::NAN]),
            Err(MetricError::Risk(_))
        ));
    }
}
