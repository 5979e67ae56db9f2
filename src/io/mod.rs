//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - CSV exports of datasets and partition assignments (`export`)
//! - report JSON read/write (`results`)

pub mod export;
pub mod ingest;
pub mod results;

pub use export::*;
pub use ingest::*;
pub use results::*;
