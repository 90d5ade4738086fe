use ::config::{Config, Environment};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::metrics::{MmdEstimator, MmdKind, DEFAULT_BANDWIDTH};
use crate::Result;

const ENV_PREFIX: &str = "SYNTHBENCH";

/// Parameters for one evaluation run
///
/// Environment overrides use the `SYNTHBENCH_` prefix, e.g.
/// `SYNTHBENCH_BANDWIDTH=0.5` or `SYNTHBENCH_SEQ_LEN=12`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// RBF kernel bandwidth (sigma)
    pub bandwidth: f64,
    /// Returns per sample row
    pub seq_len: usize,
    /// Leading real returns to window into samples
    pub sample_len: usize,
    /// Seed shared by the synthetic generators
    pub seed: u64,
    /// Use the U-statistic instead of the biased estimator
    pub unbiased: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_BANDWIDTH,
            seq_len: 24,
            sample_len: 2400,
            seed: 42,
            unbiased: false,
        }
    }
}

impl EvaluationConfig {
    /// Defaults, then `.env`, then `SYNTHBENCH_*` environment variables
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_env_prefix(ENV_PREFIX)
    }

    fn from_env_prefix(prefix: &str) -> Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("bandwidth", defaults.bandwidth)?
            .set_default("seq_len", defaults.seq_len as u64)?
            .set_default("sample_len", defaults.sample_len as u64)?
            .set_default("seed", defaults.seed)?
            .set_default("unbiased", defaults.unbiased)?
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;

        tracing::debug!("Loaded evaluation config: {:?}", config);
        Ok(config)
    }

    /// Check the parameters before any sampling happens
    pub fn validate(&self) -> Result<()> {
        if !(self.bandwidth.is_finite() && self.bandwidth > 0.0) {
            return Err(Error::InvalidBandwidth(self.bandwidth));
        }
        if self.seq_len == 0 {
            return Err(Error::InvalidParameter("seq_len must be at least 1".to_string()));
        }
        if self.sample_len < self.seq_len {
            return Err(Error::InvalidParameter(format!(
                "sample_len ({}) must cover at least one sequence of {}",
                self.sample_len, self.seq_len
            )));
        }
        Ok(())
    }

    /// Estimator matching `bandwidth` and `unbiased`
    pub fn estimator(&self) -> Result<MmdEstimator> {
        let kind = if self.unbiased {
            MmdKind::Unbiased
        } else {
            MmdKind::Biased
        };
        Ok(MmdEstimator::new(self.bandwidth)?.with_kind(kind))
    }
}
