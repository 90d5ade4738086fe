use crate::error::Error;
use crate::models::PricePoint;
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Market regimes a reference price path can follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketScenario {
    /// Steady uptrend with noise (+0.05% per step average)
    Uptrend,
    /// Steady downtrend with noise (-0.05% per step average)
    Downtrend,
    /// Mean-reverting around the starting price
    Sideways,
    /// Large ±3% swings
    Volatile,
    /// Calm first half, 40% slide over the second half
    Crash,
}

impl MarketScenario {
    pub const ALL: [MarketScenario; 5] = [
        MarketScenario::Uptrend,
        MarketScenario::Downtrend,
        MarketScenario::Sideways,
        MarketScenario::Volatile,
        MarketScenario::Crash,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MarketScenario::Uptrend => "uptrend",
            MarketScenario::Downtrend => "downtrend",
            MarketScenario::Sideways => "sideways",
            MarketScenario::Volatile => "volatile",
            MarketScenario::Crash => "crash",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

/// Generates synthetic daily price paths to stand in for a real market series
pub struct ScenarioPriceGenerator {
    rng: StdRng,
    base_price: f64,
}

impl ScenarioPriceGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 1_000.0,
        }
    }

    pub fn with_base_price(mut self, base_price: f64) -> Self {
        self.base_price = base_price;
        self
    }

    /// Generate a price path for a scenario
    ///
    /// # Arguments
    /// * `scenario` - The market regime to simulate
    /// * `num_points` - Number of prices to generate
    /// * `interval` - Time between consecutive prices
    ///
    /// The path ends now, so `interval * num_points` must stay inside the
    /// representable date range or `InvalidParameter` is returned.
    pub fn generate(
        &mut self,
        scenario: MarketScenario,
        num_points: usize,
        interval: Duration,
    ) -> Result<Vec<PricePoint>> {
        let start_time = i32::try_from(num_points)
            .ok()
            .and_then(|n| interval.checked_mul(n))
            .and_then(|span| Utc::now().checked_sub_signed(span))
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "{} points at {} apart leave the supported date range",
                    num_points, interval
                ))
            })?;

        let mut points = Vec::with_capacity(num_points);
        let mut price = self.base_price;
        let mut timestamp: DateTime<Utc> = start_time;

        for i in 0..num_points {
            price = self.step(scenario, price, i, num_points);
            points.push(PricePoint::new(timestamp, price));
            timestamp = timestamp + interval;
        }

        Ok(points)
    }

    /// Next price given the current one
    fn step(&mut self, scenario: MarketScenario, price: f64, i: usize, num_points: usize) -> f64 {
        let next = match scenario {
            MarketScenario::Uptrend => {
                let noise = self.rng.gen_range(-0.01..0.01);
                price * (1.0 + 0.0005 + noise)
            }
            MarketScenario::Downtrend => {
                let noise = self.rng.gen_range(-0.01..0.01);
                price * (1.0 - 0.0005 + noise)
            }
            MarketScenario::Sideways => {
                let reversion = (self.base_price - price) * 0.1; // 10% pull to mean
                let noise = price * self.rng.gen_range(-0.01..0.01);
                price + reversion + noise
            }
            MarketScenario::Volatile => price * (1.0 + self.rng.gen_range(-0.03..0.03)),
            MarketScenario::Crash => {
                if i < num_points / 2 {
                    price * (1.0 + self.rng.gen_range(-0.005..0.005))
                } else {
                    let drop_rate = -0.4 / (num_points as f64 / 2.0);
                    price * (1.0 + drop_rate + self.rng.gen_range(-0.005..0.005))
                }
            }
        };

        // Keep the path strictly positive so log returns stay defined
        next.max(self.base_price * 0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily() -> Duration {
        Duration::days(1)
    }

    #[test]
    fn test_generate_uptrend() {
        let mut gen = ScenarioPriceGenerator::new(42);
        let points = gen.generate(MarketScenario::Uptrend, 2000, daily()).unwrap();

        assert_eq!(points.len(), 2000);

        let first = points.first().unwrap().close;
        let last = points.last().unwrap().close;
        assert!(last > first, "Uptrend should end higher: {} -> {}", first, last);
    }

    #[test]
    fn test_generate_downtrend() {
        let mut gen = ScenarioPriceGenerator::new(42);
        let points = gen.generate(MarketScenario::Downtrend, 2000, daily()).unwrap();

        let first = points.first().unwrap().close;
        let last = points.last().unwrap().close;
        assert!(last < first, "Downtrend should end lower: {} -> {}", first, last);
    }

    #[test]
    fn test_generate_sideways() {
        let mut gen = ScenarioPriceGenerator::new(42);
        let points = gen.generate(MarketScenario::Sideways, 500, daily()).unwrap();

        // Should stay roughly around base price (±10%)
        for point in &points {
            assert!(
                point.close > 900.0 && point.close < 1100.0,
                "Sideways should stay near base: {}",
                point.close
            );
        }
    }

    #[test]
    fn test_generate_crash() {
        let mut gen = ScenarioPriceGenerator::new(42);
        let points = gen.generate(MarketScenario::Crash, 400, daily()).unwrap();

        let midpoint = points[199].close;
        let last = points.last().unwrap().close;
        assert!(last < midpoint * 0.8, "Crash should lose >20%: {} -> {}", midpoint, last);
    }

    #[test]
    fn test_prices_stay_positive() {
        for scenario in MarketScenario::ALL {
            let mut gen = ScenarioPriceGenerator::new(7);
            let points = gen.generate(scenario, 1000, daily()).unwrap();
            assert!(points.iter().all(|p| p.close > 0.0), "{:?}", scenario);
        }
    }

    #[test]
    fn test_timestamps_are_sequential() {
        let mut gen = ScenarioPriceGenerator::new(42);
        let points = gen
            .generate(MarketScenario::Volatile, 100, Duration::minutes(5))
            .unwrap();

        for i in 1..points.len() {
            assert_eq!(
                (points[i].timestamp - points[i - 1].timestamp).num_minutes(),
                5,
                "Timestamps should be evenly spaced"
            );
        }
    }

    #[test]
    fn test_same_seed_same_path() {
        let path = |seed| {
            ScenarioPriceGenerator::new(seed)
                .generate(MarketScenario::Volatile, 50, daily())
                .unwrap()
        };
        let a = path(9);
        let b = path(9);

        let closes_a: Vec<f64> = a.iter().map(|p| p.close).collect();
        let closes_b: Vec<f64> = b.iter().map(|p| p.close).collect();
        assert_eq!(closes_a, closes_b);
    }

    #[test]
    fn test_custom_base_price() {
        let mut gen = ScenarioPriceGenerator::new(42).with_base_price(50.0);
        let points = gen.generate(MarketScenario::Sideways, 200, daily()).unwrap();

        assert!(points.iter().all(|p| p.close > 40.0 && p.close < 60.0));
    }

    #[test]
    fn test_span_outside_date_range_is_an_error() {
        let mut gen = ScenarioPriceGenerator::new(42);

        // Does not fit the i32 step multiplier
        let result = gen.generate(MarketScenario::Volatile, i32::MAX as usize + 1, daily());
        assert!(matches!(result, Err(Error::InvalidParameter(_))));

        // Fits, but a billion days back is before the earliest DateTime
        let result = gen.generate(MarketScenario::Volatile, 1_000_000_000, daily());
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_scenario_from_name() {
        assert_eq!(MarketScenario::from_name("CRASH"), Some(MarketScenario::Crash));
        assert_eq!(MarketScenario::from_name("sideways"), Some(MarketScenario::Sideways));
        assert_eq!(MarketScenario::from_name("bull"), None);
    }
}
