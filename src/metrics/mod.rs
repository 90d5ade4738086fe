pub mod kernel;
pub mod mmd;

pub use kernel::{pairwise_squared_distances, rbf_gram, squared_row_norms};
pub use mmd::{compute_mmd, compute_mmd_default, MmdEstimator, MmdKind, DEFAULT_BANDWIDTH};
