//! Seeded two-way shuffle split.
//!
//! Counts are fixed by `n` and the requested share before any shuffling, so a
//! different seed changes which rows land in each part but never how many.
//! Layout follows the usual shuffle-split convention: after a seeded
//! Fisher–Yates shuffle the holdout takes the leading entries and train takes
//! the rest.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Slack applied before `floor`/`ceil` so products like `0.7 * 1000` that land
/// a hair below/above an integer round to it.
const COUNT_EPS: f64 = 1e-9;

/// How the size of a two-way split is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Share {
    /// Fraction kept for training; `n_train = floor(f * n)`.
    Train(f64),
    /// Fraction held out; `n_holdout = ceil(f * n)`.
    Holdout(f64),
}

impl Share {
    /// `(n_train, n_holdout)` for `n` rows; always sums to `n`.
    pub fn counts(self, n: usize) -> (usize, usize) {
        let n_f = n as f64;
        match self {
            Share::Train(f) => {
                let n_train = ((f * n_f + COUNT_EPS).floor().max(0.0) as usize).min(n);
                (n_train, n - n_train)
            }
            Share::Holdout(f) => {
                let n_holdout = ((f * n_f - COUNT_EPS).ceil().max(0.0) as usize).min(n);
                (n - n_holdout, n_holdout)
            }
        }
    }
}

/// Output of a two-way split, as entries of the input index list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoWay {
    pub train: Vec<usize>,
    pub holdout: Vec<usize>,
}

/// Shuffle `indices` with `random_state` and cut it into train/holdout parts.
pub fn shuffle_split(indices: &[usize], share: Share, random_state: u64) -> TwoWay {
    let (_, n_holdout) = share.counts(indices.len());

    let mut permuted = indices.to_vec();
    let mut rng = StdRng::seed_from_u64(random_state);
    permuted.shuffle(&mut rng);

    let train = permuted.split_off(n_holdout);
    TwoWay {
        train,
        holdout: permuted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_floor_for_train_and_ceil_for_holdout() {
        assert_eq!(Share::Train(0.7).counts(1000), (700, 300));
        assert_eq!(Share::Train(0.7).counts(10), (7, 3));
        assert_eq!(Share::Train(0.7).counts(9), (6, 3));
        assert_eq!(Share::Holdout(0.5).counts(300), (150, 150));
        assert_eq!(Share::Holdout(0.5).counts(3), (1, 2));
        assert_eq!(Share::Holdout(0.25).counts(0), (0, 0));
    }

    #[test]
    fn same_seed_same_parts() {
        let idx: Vec<usize> = (0..50).collect();
        let a = shuffle_split(&idx, Share::Train(0.8), 11);
        let b = shuffle_split(&idx, Share::Train(0.8), 11);
        assert_eq!(a, b);
        assert_eq!(a.train.len(), 40);
        assert_eq!(a.holdout.len(), 10);
    }

    #[test]
    fn parts_cover_input_exactly_once() {
        let idx: Vec<usize> = (100..137).collect();
        let split = shuffle_split(&idx, Share::Holdout(0.3), 3);

        let mut all: Vec<usize> = split.train.iter().chain(split.holdout.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, idx);
    }

    #[test]
    fn input_is_not_reordered() {
        let idx = vec![5, 1, 4];
        let _ = shuffle_split(&idx, Share::Train(0.5), 0);
        assert_eq!(idx, vec![5, 1, 4]);
    }
}
