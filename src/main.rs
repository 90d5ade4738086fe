use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use clap::Parser;
use synthbench::evaluation::{baseline_generators, Evaluator};
use synthbench::generators::{MarketScenario, ScenarioPriceGenerator};
use synthbench::preprocessing::log_returns;
use synthbench::settings::EvaluationConfig;

/// Score synthetic return generators against a reference series with MMD
#[derive(Parser, Debug)]
#[command(name = "synthbench")]
#[command(version)]
#[command(about = "Compare synthetic return generators with kernel MMD")]
struct Cli {
    /// RBF kernel bandwidth (sigma)
    #[arg(long)]
    bandwidth: Option<f64>,

    /// Returns per sample row
    #[arg(long)]
    seq_len: Option<usize>,

    /// Leading reference returns to use
    #[arg(long)]
    sample_len: Option<usize>,

    /// Seed for the reference path and the generators
    #[arg(long)]
    seed: Option<u64>,

    /// Use the unbiased U-statistic estimator
    #[arg(long, conflicts_with = "biased")]
    unbiased: bool,

    /// Use the biased estimator even if SYNTHBENCH_UNBIASED is set
    #[arg(long)]
    biased: bool,

    /// Reference market regime (uptrend, downtrend, sideways, volatile, crash)
    #[arg(long, default_value = "volatile")]
    scenario: String,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut EvaluationConfig) {
        if let Some(bandwidth) = self.bandwidth {
            config.bandwidth = bandwidth;
        }
        if let Some(seq_len) = self.seq_len {
            config.seq_len = seq_len;
        }
        if let Some(sample_len) = self.sample_len {
            config.sample_len = sample_len;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.unbiased {
            config.unbiased = true;
        } else if self.biased {
            config.unbiased = false;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let mut config = EvaluationConfig::load().context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid evaluation parameters")?;

    let scenario = MarketScenario::from_name(&cli.scenario)
        .ok_or_else(|| anyhow!("Unknown scenario '{}'", cli.scenario))?;

    tracing::info!(
        "Building {} reference series ({} daily prices, seed {})",
        scenario.name(),
        config.sample_len.saturating_add(1),
        config.seed
    );

    // One extra price so the return series covers sample_len exactly
    let prices = ScenarioPriceGenerator::new(config.seed)
        .generate(scenario, config.sample_len.saturating_add(1), Duration::days(1))
        .context("Failed to build reference series")?;
    let closes = synthbench::closes(&prices);
    let returns = log_returns(&closes);
    tracing::info!("Computed {} log returns", returns.len());

    let mut generators =
        baseline_generators(&returns, config.seed).context("Failed to fit generators")?;

    let evaluator = Evaluator::new(config)?;
    let report = evaluator
        .evaluate(&returns, &mut generators)
        .context("Evaluation failed")?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_report();
    }

    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("synthbench=info")
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("synthbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_loaded_config() {
        let mut config = EvaluationConfig::default();
        parse(&["--bandwidth", "0.5", "--seq-len", "12", "--unbiased"]).apply(&mut config);

        assert_eq!(config.bandwidth, 0.5);
        assert_eq!(config.seq_len, 12);
        assert_eq!(config.sample_len, 2400);
        assert!(config.unbiased);
    }

    #[test]
    fn test_biased_flag_switches_unbiased_off() {
        let mut config = EvaluationConfig {
            unbiased: true,
            ..EvaluationConfig::default()
        };

        parse(&[]).apply(&mut config);
        assert!(config.unbiased, "no flag keeps the loaded value");

        parse(&["--biased"]).apply(&mut config);
        assert!(!config.unbiased);
    }

    #[test]
    fn test_biased_and_unbiased_conflict() {
        let result = Cli::try_parse_from(["synthbench", "--biased", "--unbiased"]);
        assert!(result.is_err());
    }
}
