// Turns price series into return samples the MMD estimator can compare

use ndarray::Array2;

use crate::error::Error;
use crate::Result;

/// Log returns `ln(p[t] / p[t-1])`
///
/// Pairs involving a non-positive price have no defined log return and are
/// dropped, so the output can be shorter than `prices.len() - 1`.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter_map(|w| {
            if w[0] > 0.0 && w[1] > 0.0 {
                Some((w[1] / w[0]).ln())
            } else {
                tracing::debug!("Skipping non-positive price pair ({}, {})", w[0], w[1]);
                None
            }
        })
        .collect()
}

/// Mean and population standard deviation (ddof = 0)
pub fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    Some((mean, variance.sqrt()))
}

/// Reshape a flat series into non-overlapping rows of `seq_len` values
///
/// # Arguments
/// * `values` - Flat series, consumed front to back
/// * `seq_len` - Row width (columns of the resulting sample matrix)
/// * `limit` - Optional cap on how many leading values to use
///
/// # Returns
/// A `(len / seq_len) × seq_len` matrix; trailing values that do not fill a
/// whole row are dropped.
pub fn to_sequences(values: &[f64], seq_len: usize, limit: Option<usize>) -> Result<Array2<f64>> {
    if seq_len == 0 {
        return Err(Error::InvalidParameter(
            "sequence length must be at least 1".to_string(),
        ));
    }

    let available = limit.map_or(values.len(), |l| l.min(values.len()));
    let rows = available / seq_len;
    if rows == 0 {
        return Err(Error::EmptySample);
    }

    let used = rows * seq_len;
    if used < values.len() {
        tracing::debug!(
            "Windowing {} of {} values into {}x{}",
            used,
            values.len(),
            rows,
            seq_len
        );
    }

    Array2::from_shape_vec((rows, seq_len), values[..used].to_vec())
        .map_err(|e| Error::InvalidParameter(format!("cannot window series: {}", e)))
}
