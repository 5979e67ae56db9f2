//! Seeded synthetic admissions extract.
//!
//! Stands in for the warehouse export when benchmarking the pipeline. Stays are
//! log-normal with a log-mean that rises with age, emergency admission, prior
//! admissions, diagnosis count and procedure count, so feature-aware baselines
//! have signal to find.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Normal, Poisson};

use crate::domain::{Dataset, Observation};
use crate::error::AppError;

pub const FEATURE_NAMES: [&str; 5] = ["age", "emergency", "prior_admissions", "diagnoses", "procedures"];

/// Probability an admission came through the emergency department.
const EMERGENCY_PROB: f64 = 0.35;

/// Log-scale noise on the stay length.
const LOG_NOISE_SD: f64 = 0.35;

/// Generate `rows` admissions; identical `(rows, seed)` gives identical data.
pub fn generate_admissions(rows: usize, seed: u64) -> Result<Dataset, AppError> {
    if rows == 0 {
        return Err(AppError::new(2, "Synthetic row count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, LOG_NOISE_SD)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let prior = Poisson::new(0.8).map_err(|e| AppError::new(4, format!("Prior admissions distribution error: {e}")))?;
    let diagnoses = Poisson::new(3.0).map_err(|e| AppError::new(4, format!("Diagnoses distribution error: {e}")))?;
    let procedures = Poisson::new(1.2).map_err(|e| AppError::new(4, format!("Procedures distribution error: {e}")))?;

    let mut observations = Vec::with_capacity(rows);
    for i in 0..rows {
        let age = f64::from(rng.gen_range(18u32..=95));
        let emergency = if rng.gen_bool(EMERGENCY_PROB) { 1.0 } else { 0.0 };
        let n_prior: f64 = prior.sample(&mut rng);
        let n_diagnoses: f64 = diagnoses.sample(&mut rng) + 1.0;
        let n_procedures: f64 = procedures.sample(&mut rng);

        let log_mean = 0.2
            + 0.018 * age
            + 0.55 * emergency
            + 0.12 * n_prior.min(6.0)
            + 0.09 * n_diagnoses.min(10.0)
            + 0.15 * n_procedures.min(5.0);
        let eps: f64 = noise.sample(&mut rng);
        let length_of_stay = ((log_mean + eps).exp() * 4.0).round() / 4.0;

        observations.push(Observation {
            id: format!("SYN-{:06}", i + 1),
            length_of_stay,
            features: vec![age, emergency, n_prior, n_diagnoses, n_procedures],
        });
    }

    let names = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
    let dataset = Dataset::from_observations(names, &observations)?;
    tracing::debug!(rows, seed, "generated synthetic admissions");
    Ok(dataset)
}
