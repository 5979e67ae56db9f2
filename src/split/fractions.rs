//! Requested partition fractions and their validation.

use serde::{Deserialize, Serialize};

use super::SplitError;

/// Absolute tolerance on `train + validate + test == 1`.
pub const FRACTION_SUM_EPS: f64 = 1e-9;

/// Requested share of rows for each partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitFractions {
    pub train: f64,
    pub validate: f64,
    pub test: f64,
}

impl SplitFractions {
    pub fn new(train: f64, validate: f64, test: f64) -> Self {
        Self { train, validate, test }
    }

    /// Check every fraction is in `(0, 1)` and that they sum to 1.
    pub fn check(&self) -> Result<(), SplitError> {
        let parts = [self.train, self.validate, self.test];
        let in_range = parts.iter().all(|f| f.is_finite() && *f > 0.0 && *f < 1.0);
        let sum: f64 = parts.iter().sum();

        if !in_range || (sum - 1.0).abs() > FRACTION_SUM_EPS {
            return Err(SplitError::InvalidSplitConfiguration {
                train: self.train,
                validate: self.validate,
                test: self.test,
            });
        }
        Ok(())
    }

    /// Test's share of the non-train remainder.
    pub fn test_share_of_remainder(&self) -> f64 {
        self.test / (self.validate + self.test)
    }
}

impl Default for SplitFractions {
    fn default() -> Self {
        Self::new(0.70, 0.15, 0.15)
    }
}
