pub mod report;

pub use report::{MmdEntry, MmdReport};

use ndarray::Array2;

use crate::error::Error;
use crate::generators::{BootstrapSampler, GaussianSampler, ReturnGenerator};
use crate::metrics::MmdEstimator;
use crate::preprocessing::{mean_and_std, to_sequences};
use crate::settings::EvaluationConfig;
use crate::Result;

/// Scores synthetic return generators against a real return series
pub struct Evaluator {
    config: EvaluationConfig,
    estimator: MmdEstimator,
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Result<Self> {
        config.validate()?;
        let estimator = config.estimator()?;
        Ok(Self { config, estimator })
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Window the leading `sample_len` real returns into `seq_len`-wide rows
    pub fn real_sequences(&self, real_returns: &[f64]) -> Result<Array2<f64>> {
        to_sequences(
            real_returns,
            self.config.seq_len,
            Some(self.config.sample_len),
        )
    }

    /// Draw as many synthetic rows as `real` has and score them
    pub fn score(
        &self,
        real: &Array2<f64>,
        generator: &mut dyn ReturnGenerator,
    ) -> Result<MmdEntry> {
        let needed = real.nrows() * real.ncols();
        let synthetic = generator.sample(needed);
        let synthetic = to_sequences(&synthetic, real.ncols(), None)?;

        let score = self.estimator.estimate(real, &synthetic)?;
        tracing::info!(
            "MMD (Real vs {}): {:.6} over {} sequences",
            generator.name(),
            score,
            synthetic.nrows()
        );

        Ok(MmdEntry {
            generator: generator.name().to_string(),
            score,
            sequences: synthetic.nrows(),
        })
    }

    /// Score every generator against the same real sample
    pub fn evaluate(
        &self,
        real_returns: &[f64],
        generators: &mut [Box<dyn ReturnGenerator>],
    ) -> Result<MmdReport> {
        let real = self.real_sequences(real_returns)?;
        tracing::info!(
            "Evaluating {} generators against {}x{} real sequences",
            generators.len(),
            real.nrows(),
            real.ncols()
        );
        if generators.is_empty() {
            tracing::warn!("No generators to evaluate");
        }

        let entries = generators
            .iter_mut()
            .map(|generator| self.score(&real, generator.as_mut()))
            .collect::<Result<Vec<_>>>()?;

        Ok(MmdReport {
            bandwidth: self.estimator.bandwidth(),
            kind: self.estimator.kind(),
            seq_len: self.config.seq_len,
            real_sequences: real.nrows(),
            entries,
        })
    }
}

/// Baseline generators fitted to `real_returns`
///
/// A moment-matched Gaussian (the stand-in for a trained generative model),
/// a bootstrap resampler, and a Gaussian with doubled volatility as a
/// deliberately mis-specified control.
pub fn baseline_generators(
    real_returns: &[f64],
    seed: u64,
) -> Result<Vec<Box<dyn ReturnGenerator>>> {
    let (mean, std_dev) = mean_and_std(real_returns).ok_or(Error::EmptySample)?;

    Ok(vec![
        Box::new(GaussianSampler::fit("Moment-matched Gaussian", real_returns, seed)?),
        Box::new(BootstrapSampler::new("Bootstrap", real_returns, seed.wrapping_add(1))?),
        Box::new(GaussianSampler::new(
            "Gaussian (2x volatility)",
            mean,
            std_dev * 2.0,
            seed.wrapping_add(2),
        )?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MmdKind;

    fn config(bandwidth: f64) -> EvaluationConfig {
        EvaluationConfig {
            bandwidth,
            seq_len: 24,
            sample_len: 2400,
            seed: 42,
            unbiased: false,
        }
    }

    fn real_returns() -> Vec<f64> {
        let mut source = GaussianSampler::new("real", 0.0005, 0.01, 1).unwrap();
        source.sample(3000)
    }

    #[test]
    fn test_real_sequences_shape() {
        let evaluator = Evaluator::new(config(1.0)).unwrap();
        let real = evaluator.real_sequences(&real_returns()).unwrap();

        // 3000 returns capped at 2400 -> 100 rows of 24
        assert_eq!(real.dim(), (100, 24));
    }

    #[test]
    fn test_matched_generator_beats_mismatched() {
        let evaluator = Evaluator::new(config(0.1)).unwrap();
        let returns = real_returns();

        let mut generators: Vec<Box<dyn ReturnGenerator>> = vec![
            Box::new(GaussianSampler::fit("matched", &returns, 2).unwrap()),
            Box::new(GaussianSampler::new("wide", 0.0005, 0.05, 3).unwrap()),
            Box::new(GaussianSampler::new("shifted", 0.02, 0.01, 4).unwrap()),
        ];

        let report = evaluator.evaluate(&returns, &mut generators).unwrap();

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.real_sequences, 100);
        assert_eq!(report.best().unwrap().generator, "matched");

        let matched = report.score_of("matched").unwrap();
        assert!(report.score_of("wide").unwrap() > matched);
        assert!(report.score_of("shifted").unwrap() > matched);
    }

    #[test]
    fn test_report_carries_estimator_settings() {
        let mut cfg = config(0.5);
        cfg.unbiased = true;
        let evaluator = Evaluator::new(cfg).unwrap();
        let returns = real_returns();

        let mut generators = baseline_generators(&returns, 42).unwrap();
        let report = evaluator.evaluate(&returns, &mut generators).unwrap();

        assert_eq!(report.bandwidth, 0.5);
        assert_eq!(report.kind, MmdKind::Unbiased);
        assert_eq!(report.seq_len, 24);
        assert!(report.entries.iter().all(|e| e.sequences == 100));
    }

    #[test]
    fn test_too_few_real_returns() {
        let evaluator = Evaluator::new(config(1.0)).unwrap();
        let mut generators = baseline_generators(&[0.01, -0.01], 0).unwrap();

        let result = evaluator.evaluate(&[0.01; 10], &mut generators);
        assert!(matches!(result, Err(Error::EmptySample)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            Evaluator::new(config(-1.0)),
            Err(Error::InvalidBandwidth(_))
        ));
    }

    #[test]
    fn test_baseline_generators() {
        let returns = real_returns();
        let generators = baseline_generators(&returns, 7).unwrap();
        let names: Vec<&str> = generators.iter().map(|g| g.name()).collect();

        assert_eq!(
            names,
            vec!["Moment-matched Gaussian", "Bootstrap", "Gaussian (2x volatility)"]
        );
        assert!(baseline_generators(&[], 7).is_err());
    }
}
