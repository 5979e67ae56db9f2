//! `los-bench` library crate.
//!
//! The binary (`los`) is a thin wrapper around this library so that:
//!
//! - the risk bucketing and split routines are testable without spawning processes
//! - downstream training code can call them directly
//!
//! The two contracts other code relies on:
//!
//! - [`risk::risk_score`]: length of stay (days) → risk category 1..=5
//! - [`split::train_validate_test_split`]: seeded, reproducible train /
//!   validate / test partitions of a row-aligned [`domain::Dataset`]

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod metrics;
pub mod models;
pub mod report;
pub mod risk;
pub mod split;
