//! Train / validate / test partitioning from two chained shuffle splits.
//!
//! 1. all rows → train (`train` fraction, floored) + remainder
//! 2. remainder → validate + test (`test / (validate + test)` of it, ceiled)
//!
//! Both steps reuse the caller's `random_state`. Which rows go to train depends
//! only on `train` and the seed; changing `test` while holding `validate`
//! re-divides the same remainder. Replacing the chain with a single three-way
//! draw would change every partition for a given seed.

use serde::{Deserialize, Serialize};

use crate::domain::{Dataset, DatasetError};

use super::shuffle::{Share, shuffle_split};
use super::{SplitError, SplitFractions};

/// Original row indices of each partition, in partition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub validate: Vec<usize>,
    pub test: Vec<usize>,
}

impl SplitIndices {
    /// `(train, validate, test)` sizes.
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.train.len(), self.validate.len(), self.test.len())
    }

    pub fn total(&self) -> usize {
        self.train.len() + self.validate.len() + self.test.len()
    }

    /// Partition name per original row, for `n` rows.
    pub fn assignments(&self, n: usize) -> Vec<Option<Partition>> {
        let mut out = vec![None; n];
        for (part, indices) in [
            (Partition::Train, &self.train),
            (Partition::Validate, &self.validate),
            (Partition::Test, &self.test),
        ] {
            for &i in indices {
                if let Some(slot) = out.get_mut(i) {
                    *slot = Some(part);
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Train,
    Validate,
    Test,
}

impl Partition {
    pub fn as_str(self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Validate => "validate",
            Partition::Test => "test",
        }
    }
}

/// Row-aligned partitions of a dataset plus the indices that produced them.
#[derive(Debug, Clone)]
pub struct ThreeWaySplit {
    pub train: Dataset,
    pub validate: Dataset,
    pub test: Dataset,
    pub indices: SplitIndices,
}

impl ThreeWaySplit {
    /// Train rows followed by validate rows, for refitting before the test score.
    pub fn train_validate(&self) -> Result<Dataset, DatasetError> {
        self.train.concat(&self.validate)
    }
}

/// Compute partition indices for `n` rows.
///
/// Fails before doing any work when the fractions are invalid or `n == 0`.
pub fn split_indices(n: usize, fractions: SplitFractions, random_state: u64) -> Result<SplitIndices, SplitError> {
    fractions.check()?;
    if n == 0 {
        return Err(SplitError::EmptyDataset);
    }

    let all: Vec<usize> = (0..n).collect();
    let first = shuffle_split(&all, Share::Train(fractions.train), random_state);
    let second = shuffle_split(
        &first.holdout,
        Share::Holdout(fractions.test_share_of_remainder()),
        random_state,
    );

    let indices = SplitIndices {
        train: first.train,
        validate: second.train,
        test: second.holdout,
    };

    let (n_train, n_validate, n_test) = indices.sizes();
    if n_train == 0 || n_validate == 0 || n_test == 0 {
        tracing::warn!(n, n_train, n_validate, n_test, "split produced an empty partition");
    }
    tracing::debug!(n, n_train, n_validate, n_test, random_state, "split rows");

    Ok(indices)
}

/// Split a dataset into aligned train / validate / test partitions.
pub fn train_validate_test_split(
    dataset: &Dataset,
    fractions: SplitFractions,
    random_state: u64,
) -> Result<ThreeWaySplit, SplitError> {
    let indices = split_indices(dataset.n_rows(), fractions, random_state)?;

    Ok(ThreeWaySplit {
        train: dataset.take(&indices.train),
        validate: dataset.take(&indices.validate),
        test: dataset.take(&indices.test),
        indices,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use nalgebra::{DMatrix, DVector};

    use super::*;
    use crate::domain::TargetKind;

    fn synthetic(n: usize) -> Dataset {
        let ids = (0..n).map(|i| format!("adm-{i:04}")).collect();
        let features = DMatrix::from_fn(n, 2, |i, j| (i * 10 + j) as f64);
        let targets = DVector::from_fn(n, |i, _| i as f64 * 0.5);
        Dataset::new(ids, vec!["f0".into(), "f1".into()], features, targets, TargetKind::LengthOfStay).unwrap()
    }

    fn as_set(v: &[usize]) -> HashSet<usize> {
        v.iter().copied().collect()
    }

    #[test]
    fn thousand_rows_split_70_15_15() {
        let ds = synthetic(1000);
        let f = SplitFractions::new(0.70, 0.15, 0.15);

        let a = train_validate_test_split(&ds, f, 42).unwrap();
        assert_eq!(a.indices.sizes(), (700, 150, 150));
        assert_eq!(a.train.n_rows(), 700);
        assert_eq!(a.validate.n_rows(), 150);
        assert_eq!(a.test.n_rows(), 150);

        let again = train_validate_test_split(&ds, f, 42).unwrap();
        assert_eq!(a.indices, again.indices);

        let other = train_validate_test_split(&ds, f, 7).unwrap();
        assert_eq!(other.indices.sizes(), (700, 150, 150));
        assert_ne!(as_set(&a.indices.train), as_set(&other.indices.train));
    }

    #[test]
    fn partitions_are_disjoint_and_cover_all_rows() {
        for &(n, f) in &[
            (1usize, SplitFractions::new(0.7, 0.15, 0.15)),
            (2, SplitFractions::new(0.5, 0.25, 0.25)),
            (17, SplitFractions::new(0.6, 0.2, 0.2)),
            (101, SplitFractions::new(0.8, 0.1, 0.1)),
            (999, SplitFractions::new(0.34, 0.33, 0.33)),
        ] {
            let idx = split_indices(n, f, 5).unwrap();
            assert_eq!(idx.total(), n);

            let (tr, va, te) = (as_set(&idx.train), as_set(&idx.validate), as_set(&idx.test));
            assert!(tr.is_disjoint(&va) && tr.is_disjoint(&te) && va.is_disjoint(&te));

            let union: HashSet<usize> = tr.union(&va).chain(te.iter()).copied().collect();
            assert_eq!(union, (0..n).collect::<HashSet<_>>());
        }
    }

    #[test]
    fn sizes_do_not_depend_on_seed() {
        let f = SplitFractions::new(0.65, 0.2, 0.15);
        let expected = split_indices(257, f, 0).unwrap().sizes();
        for seed in 1..50 {
            assert_eq!(split_indices(257, f, seed).unwrap().sizes(), expected);
        }
    }

    #[test]
    fn rows_stay_aligned_with_targets_and_ids() {
        let ds = synthetic(40);
        let split = train_validate_test_split(&ds, SplitFractions::new(0.5, 0.25, 0.25), 9).unwrap();

        for (part, idx) in [
            (&split.train, &split.indices.train),
            (&split.validate, &split.indices.validate),
            (&split.test, &split.indices.test),
        ] {
            for (pos, &orig) in idx.iter().enumerate() {
                assert_eq!(part.ids[pos], ds.ids[orig]);
                assert_eq!(part.targets[pos], ds.targets[orig]);
                assert_eq!(part.features[(pos, 1)], ds.features[(orig, 1)]);
            }
        }
    }

    #[test]
    fn changing_test_share_keeps_train_rows() {
        let a = split_indices(200, SplitFractions::new(0.6, 0.2, 0.2), 13).unwrap();
        let b = split_indices(200, SplitFractions::new(0.6, 0.1, 0.3), 13).unwrap();
        assert_eq!(a.train, b.train);
        assert_ne!(a.test.len(), b.test.len());
    }

    #[test]
    fn invalid_fractions_are_rejected() {
        let ds = synthetic(10);
        for f in [SplitFractions::new(0.6, 0.15, 0.15), SplitFractions::new(0.8, 0.15, 0.15)] {
            let err = train_validate_test_split(&ds, f, 1).unwrap_err();
            assert!(matches!(err, SplitError::InvalidSplitConfiguration { .. }));
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let ds = synthetic(0);
        let err = train_validate_test_split(&ds, SplitFractions::default(), 1).unwrap_err();
        assert_eq!(err, SplitError::EmptyDataset);
    }

    #[test]
    fn invalid_fractions_win_over_empty_input() {
        let err = split_indices(0, SplitFractions::new(0.5, 0.5, 0.5), 1).unwrap_err();
        assert!(matches!(err, SplitError::InvalidSplitConfiguration { .. }));
    }

    #[test]
    fn train_validate_recombines_in_order() {
        let ds = synthetic(30);
        let split = train_validate_test_split(&ds, SplitFractions::default(), 3).unwrap();
        let joined = split.train_validate().unwrap();

        assert_eq!(joined.n_rows(), split.train.n_rows() + split.validate.n_rows());
        let expected: Vec<String> = split
            .indices
            .train
            .iter()
            .chain(split.indices.validate.iter())
            .map(|&i| ds.ids[i].clone())
            .collect();
        assert_eq!(joined.ids, expected);
    }

    #[test]
    fn assignments_label_every_row() {
        let idx = split_indices(20, SplitFractions::default(), 4).unwrap();
        let labels = idx.assignments(20);
        assert!(labels.iter().all(Option::is_some));
        let n_test = labels.iter().filter(|l| **l == Some(Partition::Test)).count();
        assert_eq!(n_test, idx.test.len());
    }
}
