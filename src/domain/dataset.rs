//! Row-aligned tabular dataset: ids, a feature matrix and a target vector.
//!
//! Row `i` of `features`, entry `i` of `targets` and `ids[i]` always describe
//! the same admission. Every operation here returns a new `Dataset`; inputs are
//! never mutated.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::domain::{RiskCategory, TargetKind};
use crate::risk::{RiskError, risk_score};

/// One admission record as read from an extract.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: String,
    /// Days admitted; may be fractional.
    pub length_of_stay: f64,
    /// Numeric features in the order of the dataset's `feature_names`.
    pub features: Vec<f64>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset is misaligned: {features} feature rows, {targets} targets, {ids} ids.")]
    Misaligned {
        features: usize,
        targets: usize,
        ids: usize,
    },
    #[error("Row {row} has {found} features; expected {expected}.")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Cannot combine datasets with different feature schemas or target kinds.")]
    SchemaMismatch,
    #[error("Risk targets can only be derived from length-of-stay targets.")]
    NotLengthOfStay,
    #[error("Invalid target at row {row}: {source}")]
    Risk {
        row: usize,
        #[source]
        source: RiskError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub ids: Vec<String>,
    pub feature_names: Vec<String>,
    pub features: DMatrix<f64>,
    pub targets: DVector<f64>,
    pub target: TargetKind,
}

impl Dataset {
    pub fn new(
        ids: Vec<String>,
        feature_names: Vec<String>,
        features: DMatrix<f64>,
        targets: DVector<f64>,
        target: TargetKind,
    ) -> Result<Self, DatasetError> {
        if features.nrows() != targets.len() || ids.len() != targets.len() {
            return Err(DatasetError::Misaligned {
                features: features.nrows(),
                targets: targets.len(),
                ids: ids.len(),
            });
        }
        if features.ncols() != feature_names.len() {
            return Err(DatasetError::RaggedRow {
                row: 0,
                expected: feature_names.len(),
                found: features.ncols(),
            });
        }
        Ok(Self {
            ids,
            feature_names,
            features,
            targets,
            target,
        })
    }

    /// Build a length-of-stay dataset from observation records.
    pub fn from_observations(feature_names: Vec<String>, observations: &[Observation]) -> Result<Self, DatasetError> {
        let p = feature_names.len();
        if let Some((row, obs)) = observations.iter().enumerate().find(|(_, o)| o.features.len() != p) {
            return Err(DatasetError::RaggedRow {
                row,
                expected: p,
                found: obs.features.len(),
            });
        }

        let n = observations.len();
        let features = DMatrix::from_row_iterator(n, p, observations.iter().flat_map(|o| o.features.iter().copied()));
        let targets = DVector::from_iterator(n, observations.iter().map(|o| o.length_of_stay));
        let ids = observations.iter().map(|o| o.id.clone()).collect();

        Self::new(ids, feature_names, features, targets, TargetKind::LengthOfStay)
    }

    pub fn n_rows(&self) -> usize {
        self.targets.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Rows at `indices`, in the given order.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn take(&self, indices: &[usize]) -> Dataset {
        Dataset {
            ids: indices.iter().map(|&i| self.ids[i].clone()).collect(),
            feature_names: self.feature_names.clone(),
            features: self.features.select_rows(indices.iter()),
            targets: self.targets.select_rows(indices.iter()),
            target: self.target,
        }
    }

    /// Rows of `self` followed by rows of `other`.
    pub fn concat(&self, other: &Dataset) -> Result<Dataset, DatasetError> {
        if self.feature_names != other.feature_names || self.target != other.target {
            return Err(DatasetError::SchemaMismatch);
        }

        let n1 = self.n_rows();
        let n = n1 + other.n_rows();
        let features = DMatrix::from_fn(n, self.n_features(), |i, j| {
            if i < n1 {
                self.features[(i, j)]
            } else {
                other.features[(i - n1, j)]
            }
        });
        let targets = DVector::from_iterator(n, self.targets.iter().chain(other.targets.iter()).copied());
        let ids = self.ids.iter().chain(other.ids.iter()).cloned().collect();

        Dataset::new(ids, self.feature_names.clone(), features, targets, self.target)
    }

    /// Same rows with length-of-stay targets replaced by risk category codes.
    pub fn with_risk_targets(&self) -> Result<Dataset, DatasetError> {
        if self.target != TargetKind::LengthOfStay {
            return Err(DatasetError::NotLengthOfStay);
        }

        let mut codes = Vec::with_capacity(self.n_rows());
        for (row, &los) in self.targets.iter().enumerate() {
            let category = risk_score(los).map_err(|source| DatasetError::Risk { row, source })?;
            codes.push(f64::from(category.code()));
        }

        Ok(Dataset {
            ids: self.ids.clone(),
            feature_names: self.feature_names.clone(),
            features: self.features.clone(),
            targets: DVector::from_vec(codes),
            target: TargetKind::RiskCategory,
        })
    }

    /// Count of rows per risk category (only meaningful for risk targets).
    pub fn category_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for &t in self.targets.iter() {
            if let Some(c) = RiskCategory::from_code(t.round() as u8) {
                counts[usize::from(c.code() - 1)] += 1;
            }
        }
        counts
    }
}
