// Core modules
pub mod error;
pub mod evaluation;
pub mod generators;
pub mod metrics;
pub mod models;
pub mod preprocessing;
pub mod settings;

// Re-export commonly used types
pub use error::Error;
pub use metrics::{compute_mmd, compute_mmd_default, MmdEstimator, MmdKind, DEFAULT_BANDWIDTH};
pub use models::*;

pub type Result<T> = std::result::Result<T, Error>;
