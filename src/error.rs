//! Application-level error carrying a process exit code.
//!
//! Domain modules return their own typed errors; they are folded into
//! `AppError` at the command boundary so `main` can pick an exit code:
//!
//! - `2`: invalid configuration or usage
//! - `3`: unusable input data
//! - `4`: computation failure

use crate::domain::DatasetError;
use crate::metrics::MetricError;
use crate::risk::RiskError;
use crate::split::SplitError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        let code = match err {
            SplitError::InvalidSplitConfiguration { .. } => 2,
            SplitError::EmptyDataset => 3,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<RiskError> for AppError {
    fn from(err: RiskError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl From<MetricError> for AppError {
    fn from(err: MetricError) -> Self {
        AppError::new(4, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_errors_map_to_distinct_exit_codes() {
        let bad = AppError::from(SplitError::InvalidSplitConfiguration {
            train: 0.5,
            validate: 0.2,
            test: 0.2,
        });
        assert_eq!(bad.exit_code(), 2);

        let empty = AppError::from(SplitError::EmptyDataset);
        assert_eq!(empty.exit_code(), 3);
        assert!(empty.message().contains("empty"));
    }
}
