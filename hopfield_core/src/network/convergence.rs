//! Convergence detection between consecutive recall sweeps.

use ndarray::ArrayView1;

use crate::error::{HopfieldError, HopfieldResult, ValidationKind};

/// Decides whether two consecutive network states have stabilized.
///
/// The change between states is the mean absolute difference
/// `sum(|current - previous|) / N`. For bipolar vectors this is twice the
/// fraction of flipped neurons. Every checked change is kept in an ordered
/// history until [`ConvergenceChecker::reset`].
#[derive(Debug, Clone)]
pub struct ConvergenceChecker {
    threshold: f64,
    history: Vec<f64>,
}

impl ConvergenceChecker {
    /// Create a checker; `threshold` must lie strictly between 0 and 1.
    pub fn new(threshold: f64) -> HopfieldResult<Self> {
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(HopfieldError::validation(
                ValidationKind::Threshold,
                format!("threshold must be in (0, 1), got {}", threshold),
            ));
        }
        Ok(Self {
            threshold,
            history: Vec::new(),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Record the change between `current` and `previous` and report whether
    /// it is below the threshold.
    pub fn check(
        &mut self,
        current: ArrayView1<'_, f64>,
        previous: ArrayView1<'_, f64>,
    ) -> HopfieldResult<bool> {
        if current.len() != previous.len() {
            return Err(HopfieldError::shape_mismatch(
                previous.len(),
                current.len(),
                "convergence check",
            ));
        }

        // An empty state cannot change.
        let change = if current.is_empty() {
            0.0
        } else {
            let total: f64 = current
                .iter()
                .zip(previous.iter())
                .map(|(c, p)| (c - p).abs())
                .sum();
            total / current.len() as f64
        };

        self.history.push(change);
        Ok(change < self.threshold)
    }

    /// Clear the change history before a fresh run.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Normalized change of every check since the last reset, oldest first.
    pub fn history(&self) -> &[f64] {
        &self.history
    }
}
