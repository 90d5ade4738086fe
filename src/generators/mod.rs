// Synthetic return generators scored against a reference series

pub mod bootstrap;
pub mod gaussian;
pub mod scenario;

pub use bootstrap::BootstrapSampler;
pub use gaussian::GaussianSampler;
pub use scenario::{MarketScenario, ScenarioPriceGenerator};

/// Source of synthetic log returns
pub trait ReturnGenerator {
    /// Label used in reports
    fn name(&self) -> &str;

    /// Draw `n` returns
    fn sample(&mut self, n: usize) -> Vec<f64>;
}
