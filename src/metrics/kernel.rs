use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

use crate::error::Error;
use crate::Result;

/// Reject bandwidths that would turn the kernel into NaN/Inf
pub fn validate_bandwidth(sigma: f64) -> Result<()> {
    if sigma.is_finite() && sigma > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidBandwidth(sigma))
    }
}

/// Squared Euclidean norm of every row: `r[i] = Σ_k a[i,k]²`
pub fn squared_row_norms<S>(a: &ArrayBase<S, Ix2>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    a.map_axis(Axis(1), |row| row.dot(&row))
}

/// Pairwise squared Euclidean distances between the rows of `a` and `b`
///
/// Uses `‖a_i − b_j‖² = r_a[i] − 2·(a_i·b_j) + r_b[j]` so the whole matrix
/// costs one matrix product plus two broadcasts.
///
/// # Returns
/// An `a.nrows() × b.nrows()` matrix of non-negative entries, or `DimensionMismatch` when the
/// column counts differ.
pub fn pairwise_squared_distances<S1, S2>(
    a: &ArrayBase<S1, Ix2>,
    b: &ArrayBase<S2, Ix2>,
) -> Result<Array2<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if a.ncols() != b.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.ncols(),
            got: b.ncols(),
        });
    }

    let ra = squared_row_norms(a).insert_axis(Axis(1)); // n_a x 1
    let rb = squared_row_norms(b).insert_axis(Axis(0)); // 1 x n_b

    let mut dist = a.dot(&b.t());
    dist *= -2.0;
    dist += &ra;
    dist += &rb;

    // Cancellation can leave tiny negatives for nearby large-magnitude rows.
    // NaN must pass through untouched.
    dist.mapv_inplace(|d| if d < 0.0 { 0.0 } else { d });

    Ok(dist)
}

/// RBF Gram matrix `K[i,j] = exp(−‖a_i − b_j‖² / 2σ²)`
pub fn rbf_gram<S1, S2>(
    a: &ArrayBase<S1, Ix2>,
    b: &ArrayBase<S2, Ix2>,
    sigma: f64,
) -> Result<Array2<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    validate_bandwidth(sigma)?;

    let denom = 2.0 * sigma * sigma;
    let dist = pairwise_squared_distances(a, b)?;

    Ok(dist.mapv_into(|d| (-d / denom).exp()))
}
