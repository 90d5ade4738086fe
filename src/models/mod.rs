use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closing price at a specific point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Pull the closing prices out of a series, preserving order
pub fn closes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_closes_preserve_order() {
        let start = Utc::now();
        let points = vec![
            PricePoint::new(start, 100.0),
            PricePoint::new(start + Duration::days(1), 101.5),
            PricePoint::new(start + Duration::days(2), 99.0),
        ];

        assert_eq!(closes(&points), vec![100.0, 101.5, 99.0]);
    }
}
