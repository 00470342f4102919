//! Error types for the decision engine.
//!
//! Only construction-time configuration problems surface as errors; every
//! runtime query degrades to a safe default instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown bot style: {0}")]
    UnknownStyle(String),

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f32 },

    #[error("invalid decision request: {0}")]
    BadRequest(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
