//! Baseline estimators.
//!
//! The benchmark compares learned models against simple references; these
//! are those references. Each implements `Estimator` so evaluation code can
//! stay generic.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::{solve_least_squares, with_intercept};

/// Something that can be fitted on `(X, y)` and then predict for new rows.
pub trait Estimator: Send {
    /// Short identifier used in reports.
    fn name(&self) -> &'static str;

    fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), AppError>;

    fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>, AppError>;
}

fn ensure_fit_input(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), AppError> {
    if x.nrows() != y.len() {
        return Err(AppError::new(
            4,
            format!("Feature rows ({}) do not match targets ({}).", x.nrows(), y.len()),
        ));
    }
    if y.is_empty() {
        return Err(AppError::new(3, "Cannot fit on an empty training set."));
    }
    Ok(())
}

fn not_fitted(name: &str) -> AppError {
    AppError::new(4, format!("{name}: predict called before fit."))
}

/// Predicts the training mean for every row.
#[derive(Debug, Clone, Default)]
pub struct MeanRegressor {
    mean: Option<f64>,
}

impl Estimator for MeanRegressor {
    fn name(&self) -> &'static str {
        "mean"
    }

    fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), AppError> {
        ensure_fit_input(x, y)?;
        self.mean = Some(y.mean());
        Ok(())
    }

    fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>, AppError> {
        let mean = self.mean.ok_or_else(|| not_fitted(self.name()))?;
        Ok(DVector::from_element(x.nrows(), mean))
    }
}

/// Ordinary least squares with an intercept.
#[derive(Debug, Clone, Default)]
pub struct LinearRegressor {
    coefficients: Option<DVector<f64>>,
}

impl LinearRegressor {
    /// Intercept first, then one coefficient per feature.
    pub fn coefficients(&self) -> Option<&DVector<f64>> {
        self.coefficients.as_ref()
    }
}

impl Estimator for LinearRegressor {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), AppError> {
        ensure_fit_input(x, y)?;
        let design = with_intercept(x);
        let beta = solve_least_squares(&design, y)
            .ok_or_else(|| AppError::new(4, "Least squares solve failed (ill-conditioned features)."))?;
        tracing::debug!(n = y.len(), p = x.ncols(), "fitted linear baseline");
        self.coefficients = Some(beta);
        Ok(())
    }

    fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>, AppError> {
        let beta = self.coefficients.as_ref().ok_or_else(|| not_fitted(self.name()))?;
        if x.ncols() + 1 != beta.len() {
            return Err(AppError::new(
                4,
                format!("linear: expected {} features, got {}.", beta.len() - 1, x.ncols()),
            ));
        }
        Ok(with_intercept(x) * beta)
    }
}

/// Predicts the most frequent training label; ties go to the lowest label.
#[derive(Debug, Clone, Default)]
pub struct MajorityClassifier {
    label: Option<f64>,
}

impl Estimator for MajorityClassifier {
    fn name(&self) -> &'static str {
        "majority"
    }

    fn fit(&mut self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(), AppError> {
        ensure_fit_input(x, y)?;

        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for &v in y.iter() {
            *counts.entry(v.round() as i64).or_default() += 1;
        }
        // BTreeMap iterates ascending, and `max_by_key` keeps the last maximum,
        // so walk in reverse to let the lowest label win ties.
        let label = counts
            .iter()
            .rev()
            .max_by_key(|(_, n)| **n)
            .map(|(label, _)| *label as f64);

        self.label = label;
        Ok(())
    }

    fn predict(&self, x: &DMatrix<f64>) -> Result<DVector<f64>, AppError> {
        let label = self.label.ok_or_else(|| not_fitted(self.name()))?;
        Ok(DVector::from_element(x.nrows(), label))
    }
}
