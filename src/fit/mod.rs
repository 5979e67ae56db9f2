//! Model evaluation orchestration.
//!
//! Responsibilities:
//!
//! - fit an estimator and score it on a held-out partition (`train`)
//! - validate-then-refit protocol over a three-way split (`evaluate`)
//! - repeat the protocol across seeds in parallel (`evaluate::sweep_seeds`)

pub mod evaluate;
pub mod train;

pub use evaluate::*;
pub use train::*;
