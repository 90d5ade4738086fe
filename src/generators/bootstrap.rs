use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::generators::ReturnGenerator;
use crate::Result;

/// Resamples a reference return series with replacement
///
/// Keeps the marginal distribution (fat tails included) but destroys any
/// serial dependence such as volatility clustering.
pub struct BootstrapSampler {
    name: String,
    rng: StdRng,
    pool: Vec<f64>,
}

impl BootstrapSampler {
    pub fn new(name: impl Into<String>, reference: &[f64], seed: u64) -> Result<Self> {
        if reference.is_empty() {
            return Err(Error::EmptySample);
        }

        Ok(Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
            pool: reference.to_vec(),
        })
    }
}

impl ReturnGenerator for BootstrapSampler {
    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&mut self, n: usize) -> Vec<f64> {
        let len = self.pool.len();
        (0..n)
            .map(|_| self.pool[self.rng.gen_range(0..len)])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_come_from_pool() {
        let reference = vec![-0.5, 0.25, 1.0];
        let mut sampler = BootstrapSampler::new("bootstrap", &reference, 3).unwrap();

        let draws = sampler.sample(500);
        assert_eq!(draws.len(), 500);
        assert!(draws.iter().all(|d| reference.contains(d)));
        // Every value should show up with this many draws
        for value in &reference {
            assert!(draws.contains(value), "{} never drawn", value);
        }
    }

    #[test]
    fn test_empty_reference() {
        assert!(matches!(
            BootstrapSampler::new("bootstrap", &[], 0),
            Err(Error::EmptySample)
        ));
    }
}
