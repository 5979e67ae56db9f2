//! Baseline estimators and the `Estimator` seam evaluation code is generic over.

pub mod estimator;

pub use estimator::*;

use crate::domain::Task;

/// Baselines appropriate for a task, in report order.
pub fn baselines_for(task: Task) -> Vec<Box<dyn Estimator>> {
    match task {
        Task::Regression => vec![
            Box::new(MeanRegressor::default()) as Box<dyn Estimator>,
            Box::new(LinearRegressor::default()),
        ],
        Task::Classification => vec![Box::new(MajorityClassifier::default()) as Box<dyn Estimator>],
    }
}
