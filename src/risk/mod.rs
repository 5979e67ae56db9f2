//! Length-of-stay to risk-category bucketing.
//!
//! The same function labels ground truth and post-processes regression
//! predictions, so both sides of a cross-model comparison agree on bucket
//! boundaries.
//!
//! Rules:
//!
//! - partial days count as a whole day (`ceil`), so 6.1 days is bucketed as 7
//! - negative inputs are clamped to 0 before rounding
//! - `NaN` is rejected
//!
//! | rounded days | category |
//! |--------------|----------|
//! | `> 15`       | 5 (high) |
//! | `> 13`       | 4        |
//! | `> 10`       | 3        |
//! | `> 6`        | 2        |
//! | otherwise    | 1 (very low) |

use thiserror::Error;

use crate::domain::RiskCategory;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RiskError {
    #[error("Length of stay is NaN; cannot assign a risk category.")]
    NotANumber,
    #[error("Length of stay at index {index} is NaN; cannot assign a risk category.")]
    NotANumberAt { index: usize },
}

/// Lower bounds (exclusive, in whole days) checked top-down.
const THRESHOLDS: [(f64, RiskCategory); 4] = [
    (15.0, RiskCategory::High),
    (13.0, RiskCategory::Elevated),
    (10.0, RiskCategory::Normal),
    (6.0, RiskCategory::Low),
];

/// Map a length of stay (days) to its risk category.
pub fn risk_score(los: f64) -> Result<RiskCategory, RiskError> {
    if los.is_nan() {
        return Err(RiskError::NotANumber);
    }

    // Comparing in f64 keeps +inf total without an integer cast.
    let days = los.max(0.0).ceil();

    Ok(THRESHOLDS
        .iter()
        .find(|(bound, _)| days > *bound)
        .map_or(RiskCategory::VeryLow, |&(_, category)| category))
}

/// Bucket every value, failing on the first `NaN`.
pub fn risk_scores(values: &[f64]) -> Result<Vec<RiskCategory>, RiskError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &los)| risk_score(los).map_err(|_| RiskError::NotANumberAt { index }))
        .collect()
}

/// Set negative predictions to zero (a stay cannot be shorter than 0 days).
pub fn clip_non_negative(values: &mut [f64]) {
    for v in values.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
}
