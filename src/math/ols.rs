//! Least squares solver for the linear baseline.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! with an intercept column prepended to the features.
//!
//! Implementation choices:
//! - SVD handles tall (more rows than columns) design matrices and rank
//!   deficiency, which is common with indicator features such as an
//!   emergency-admission flag that is constant within a small split.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)

use nalgebra::{DMatrix, DVector};

/// Prepend a column of ones to `x`.
pub fn with_intercept(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.clone().insert_column(0, 1.0)
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}
