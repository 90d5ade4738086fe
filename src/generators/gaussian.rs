use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::Error;
use crate::generators::ReturnGenerator;
use crate::preprocessing::mean_and_std;
use crate::Result;

/// I.i.d. normal returns with moments matched to a reference series
pub struct GaussianSampler {
    name: String,
    rng: StdRng,
    dist: Normal<f64>,
}

impl GaussianSampler {
    /// Create a sampler with explicit moments
    pub fn new(name: impl Into<String>, mean: f64, std_dev: f64, seed: u64) -> Result<Self> {
        if !mean.is_finite() || !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "normal(mean={}, std={}) needs a finite mean and a finite std >= 0",
                mean, std_dev
            )));
        }

        let dist = Normal::new(mean, std_dev).map_err(|e| {
            Error::InvalidParameter(format!(
                "normal(mean={}, std={}) rejected: {}",
                mean, std_dev, e
            ))
        })?;

        Ok(Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
            dist,
        })
    }

    /// Fit mean and population std to `reference`
    pub fn fit(name: impl Into<String>, reference: &[f64], seed: u64) -> Result<Self> {
        let (mean, std_dev) = mean_and_std(reference).ok_or(Error::EmptySample)?;
        let name = name.into();

        tracing::debug!(
            "Fitted {} to {} returns: mean={:.6}, std={:.6}",
            name,
            reference.len(),
            mean,
            std_dev
        );

        Self::new(name, mean, std_dev, seed)
    }

    pub fn mean(&self) -> f64 {
        self.dist.mean()
    }

    pub fn std_dev(&self) -> f64 {
        self.dist.std_dev()
    }
}

impl ReturnGenerator for GaussianSampler {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.dist.sample(&mut self.rng)).collect()
    }
}
