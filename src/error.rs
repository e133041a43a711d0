//! Error types.
//!
//! - `ConfigError`: a reward configuration (or something built from one) is invalid.
//!   Raised when a config is constructed or loaded, never by the evaluator itself.
//! - `AppError`: application boundary error carrying the process exit code.

use thiserror::Error;

/// Invalid reward configuration input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `rank_min` must be strictly below `rank_max`.
    #[error("Degenerate rank domain: min={min}, max={max} (min must be < max).")]
    DegenerateDomain { min: i64, max: i64 },

    #[error("Field '{field}' must be a finite number (got {value}).")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Invalid profile name '{name}': use 1-64 characters from [A-Za-z0-9_-].")]
    InvalidName { name: String },

    #[error("An event rollout needs at least 2 slots (got {slots}).")]
    TooFewSlots { slots: usize },
}

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

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(2, err.to_string())
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
