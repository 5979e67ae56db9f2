//! Data sources that do not come from a file: seeded synthetic admissions.

pub mod synthetic;

pub use synthetic::{FEATURE_NAMES, generate_admissions};
