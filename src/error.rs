use thiserror::Error;

/// Errors produced while preparing samples or scoring them
#[derive(Error, Debug)]
pub enum Error {
    #[error("Dimension mismatch: expected {expected} columns, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Invalid kernel bandwidth: {0} (must be positive and finite)")]
    InvalidBandwidth(f64),

    #[error("Sample is empty")]
    EmptySample,

    #[error("Not enough samples: need at least {needed}, got {got}")]
    InsufficientSamples { needed: usize, got: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}
