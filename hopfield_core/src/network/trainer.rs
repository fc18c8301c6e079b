//! Hebbian weight computation.

use ndarray::{Array2, ArrayView2};

/// Relative tolerance used by [`is_symmetric`].
const SYMMETRY_RTOL: f64 = 1e-5;
/// Absolute tolerance used by [`is_symmetric`].
const SYMMETRY_ATOL: f64 = 1e-8;

/// Compute the superposition weight matrix `W = (1/P) · Pᵗ·P` with a zero
/// diagonal.
///
/// `patterns` has shape `(P, N)` and must already be validated: bipolar
/// values and at least one row.
pub fn hebbian_weights(patterns: ArrayView2<'_, f64>) -> Array2<f64> {
    let n_patterns = patterns.nrows() as f64;
    let mut weights = patterns.t().dot(&patterns) / n_patterns;
    weights.diag_mut().fill(0.0);
    weights
}

/// Element-wise symmetry check with floating tolerance
/// (`|W[i,j] - W[j,i]| <= atol + rtol·|W[j,i]|`).
pub fn is_symmetric(weights: &Array2<f64>) -> bool {
    if !weights.is_square() {
        return false;
    }
    weights.indexed_iter().all(|((i, j), &w)| {
        let mirror = weights[[j, i]];
        (w - mirror).abs() <= SYMMETRY_ATOL + SYMMETRY_RTOL * mirror.abs()
    })
}

/// Frobenius norm of the weight matrix.
pub fn frobenius_norm(weights: &Array2<f64>) -> f64 {
    weights.iter().map(|w| w * w).sum::<f64>().sqrt()
}
