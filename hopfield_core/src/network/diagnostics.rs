//! Energy, capacity and training snapshots.

use ndarray::{Array2, ArrayView1};
use serde::Serialize;

use crate::error::{HopfieldError, HopfieldResult};

/// Fraction of the neuron count that can hold uncorrelated patterns reliably.
pub const CAPACITY_RATIO: f64 = 0.138;

/// Hopfield energy `E(s) = -0.5 · sᵗ·W·s`.
///
/// Lower energy means a configuration closer to an attractor. A non-square
/// matrix or a `state` of the wrong length is a shape mismatch.
pub fn energy(weights: &Array2<f64>, state: ArrayView1<'_, f64>) -> HopfieldResult<f64> {
    let (rows, cols) = weights.dim();
    if rows != cols {
        return Err(HopfieldError::shape_mismatch(rows, cols, "energy weights"));
    }
    if state.len() != rows {
        return Err(HopfieldError::shape_mismatch(rows, state.len(), "energy"));
    }
    Ok(-0.5 * state.dot(&weights.dot(&state)))
}

/// Theoretical capacity `0.138 · n_neurons`; advisory only.
pub fn capacity(n_neurons: usize) -> f64 {
    CAPACITY_RATIO * n_neurons as f64
}

/// Read-only snapshot of the network's training state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingInfo {
    pub is_trained: bool,
    pub n_neurons: usize,
    /// (width, height)
    pub pattern_size: (usize, usize),
    pub n_patterns_trained: usize,
    pub capacity: f64,
    /// `n_patterns_trained / capacity`, 0 when untrained
    pub usage_ratio: f64,
    /// Frobenius norm of the weights, 0 when untrained
    pub weights_norm: f64,
}

impl TrainingInfo {
    /// True when more patterns are stored than the capacity estimate allows.
    pub fn is_over_capacity(&self) -> bool {
        self.usage_ratio > 1.0
    }
}
