//! Logging setup for the `los` binary.
//!
//! Installs a global tracing subscriber writing to stderr so reports on stdout
//! stay clean for piping. The filter comes from `RUST_LOG` (which may be set
//! in `.env`), defaulting to `info`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::AppError;

/// Initialize tracing. Fails if a global subscriber is already installed.
pub fn init() -> Result<(), AppError> {
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(build_env_filter())
        .with(layer)
        .try_init()
        .map_err(|e| AppError::new(4, format!("Failed to install tracing subscriber: {e}")))
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
