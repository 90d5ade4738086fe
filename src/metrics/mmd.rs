use ndarray::{Array2, ArrayBase, Data, Ix2};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::metrics::kernel::{rbf_gram, validate_bandwidth};
use crate::Result;

/// Kernel bandwidth used when the caller has no preference
pub const DEFAULT_BANDWIDTH: f64 = 1.0;

/// Which MMD² estimator to compute from the Gram matrices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MmdKind {
    /// Means over every Gram entry, diagonal included
    #[default]
    Biased,
    /// U-statistic: within-sample means skip the diagonal
    Unbiased,
}

/// Squared Maximum Mean Discrepancy under an RBF kernel
///
/// Lower scores mean the two samples are statistically closer. The biased
/// estimator is always ≥ 0 up to rounding; the unbiased one can dip below
/// zero when the samples come from the same distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MmdEstimator {
    bandwidth: f64,
    kind: MmdKind,
}

impl MmdEstimator {
    /// Create a biased estimator with the given bandwidth
    pub fn new(bandwidth: f64) -> Result<Self> {
        validate_bandwidth(bandwidth)?;
        Ok(Self {
            bandwidth,
            kind: MmdKind::Biased,
        })
    }

    pub fn with_kind(mut self, kind: MmdKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn kind(&self) -> MmdKind {
        self.kind
    }

    /// Estimate MMD² between the rows of `x` (n₁×d) and `y` (n₂×d)
    ///
    /// # Errors
    /// * `DimensionMismatch` - `x` and `y` have different column counts
    /// * `EmptySample` - either input has no rows
    /// * `InsufficientSamples` - unbiased estimate with fewer than 2 rows
    pub fn estimate<S1, S2>(
        &self,
        x: &ArrayBase<S1, Ix2>,
        y: &ArrayBase<S2, Ix2>,
    ) -> Result<f64>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        if x.ncols() != y.ncols() {
            return Err(Error::DimensionMismatch {
                expected: x.ncols(),
                got: y.ncols(),
            });
        }
        if x.nrows() == 0 || y.nrows() == 0 {
            return Err(Error::EmptySample);
        }
        if self.kind == MmdKind::Unbiased {
            let smallest = x.nrows().min(y.nrows());
            if smallest < 2 {
                return Err(Error::InsufficientSamples {
                    needed: 2,
                    got: smallest,
                });
            }
        }

        tracing::debug!(
            "Computing {:?} MMD: x={}x{}, y={}x{}, sigma={}",
            self.kind,
            x.nrows(),
            x.ncols(),
            y.nrows(),
            y.ncols(),
            self.bandwidth
        );

        let kxx = rbf_gram(x, x, self.bandwidth)?;
        let kyy = rbf_gram(y, y, self.bandwidth)?;
        let kxy = rbf_gram(x, y, self.bandwidth)?;

        let score = match self.kind {
            MmdKind::Biased => full_mean(&kxx) + full_mean(&kyy) - 2.0 * full_mean(&kxy),
            MmdKind::Unbiased => {
                off_diagonal_mean(&kxx) + off_diagonal_mean(&kyy) - 2.0 * full_mean(&kxy)
            }
        };

        Ok(score)
    }
}

impl Default for MmdEstimator {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_BANDWIDTH,
            kind: MmdKind::Biased,
        }
    }
}

/// Biased MMD² between the rows of `x` and `y` with RBF bandwidth `sigma`
///
/// `mean(Kxx) + mean(Kyy) − 2·mean(Kxy)`, every mean taken over all entries.
pub fn compute_mmd<S1, S2>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix2>,
    sigma: f64,
) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    MmdEstimator::new(sigma)?.estimate(x, y)
}

/// `compute_mmd` with `DEFAULT_BANDWIDTH`
pub fn compute_mmd_default<S1, S2>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix2>,
) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    compute_mmd(x, y, DEFAULT_BANDWIDTH)
}

fn full_mean(k: &Array2<f64>) -> f64 {
    k.sum() / k.len() as f64
}

// Caller guarantees a square matrix with at least 2 rows
fn off_diagonal_mean(k: &Array2<f64>) -> f64 {
    let n = k.nrows() as f64;
    (k.sum() - k.diag().sum()) / (n * (n - 1.0))
}
