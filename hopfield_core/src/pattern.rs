//! Bipolar pattern validation and comparison.
//!
//! Patterns arrive from the image layer as row-major `f64` vectors whose
//! every element is exactly -1 or +1. Nothing here coerces values: anything
//! else is rejected with a [`ValidationKind`] naming the broken constraint.

use ndarray::{ArrayView1, ArrayView2, ArrayViewD, Ix1, Ix2};

use crate::error::{HopfieldError, HopfieldResult, ValidationKind};

/// Returns true when `value` is exactly -1.0 or +1.0.
#[inline]
pub fn is_bipolar(value: f64) -> bool {
    value == 1.0 || value == -1.0
}

/// Validate a single probe or stored pattern of `expected_len` neurons.
pub fn validate_pattern(pattern: ArrayView1<'_, f64>, expected_len: usize) -> HopfieldResult<()> {
    if pattern.len() != expected_len {
        return Err(HopfieldError::validation(
            ValidationKind::Width,
            format!(
                "pattern must have {} elements, got {}",
                expected_len,
                pattern.len()
            ),
        ));
    }

    if let Some(index) = pattern.iter().position(|&v| !is_bipolar(v)) {
        return Err(HopfieldError::validation(
            ValidationKind::Values,
            format!(
                "pattern may only contain -1 or 1, found {} at index {}",
                pattern[index], index
            ),
        ));
    }

    Ok(())
}

/// Validate a training batch of shape `(n_patterns, expected_neurons)`.
pub fn validate_patterns(
    patterns: ArrayView2<'_, f64>,
    expected_neurons: usize,
) -> HopfieldResult<()> {
    let (rows, cols) = patterns.dim();

    if cols != expected_neurons {
        return Err(HopfieldError::validation(
            ValidationKind::Width,
            format!(
                "each pattern must have {} neurons, got {}",
                expected_neurons, cols
            ),
        ));
    }

    if rows == 0 {
        return Err(HopfieldError::validation(
            ValidationKind::Empty,
            "at least one pattern is required",
        ));
    }

    if let Some(((row, col), value)) = patterns.indexed_iter().find(|(_, v)| !is_bipolar(**v)) {
        return Err(HopfieldError::validation(
            ValidationKind::Values,
            format!(
                "patterns may only contain -1 or 1, found {} at ({}, {})",
                value, row, col
            ),
        ));
    }

    Ok(())
}

/// Validate dynamic-rank input as a single pattern and return the typed view.
pub fn validate_pattern_dyn<'a>(
    pattern: ArrayViewD<'a, f64>,
    expected_len: usize,
) -> HopfieldResult<ArrayView1<'a, f64>> {
    let ndim = pattern.ndim();
    let view = pattern.into_dimensionality::<Ix1>().map_err(|_| {
        HopfieldError::validation(
            ValidationKind::Rank,
            format!("pattern must be 1-dimensional, got {}D", ndim),
        )
    })?;
    validate_pattern(view.view(), expected_len)?;
    Ok(view)
}

/// Validate dynamic-rank input as a training batch and return the typed view.
pub fn validate_patterns_dyn<'a>(
    patterns: ArrayViewD<'a, f64>,
    expected_neurons: usize,
) -> HopfieldResult<ArrayView2<'a, f64>> {
    let ndim = patterns.ndim();
    let view = patterns.into_dimensionality::<Ix2>().map_err(|_| {
        HopfieldError::validation(
            ValidationKind::Rank,
            format!("patterns must be 2-dimensional, got {}D", ndim),
        )
    })?;
    validate_patterns(view.view(), expected_neurons)?;
    Ok(view)
}

/// Number of positions where two patterns disagree.
pub fn hamming_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> HopfieldResult<usize> {
    if a.len() != b.len() {
        return Err(HopfieldError::shape_mismatch(
            a.len(),
            b.len(),
            "hamming distance",
        ));
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

/// Normalized overlap `a·b / N` in [-1, 1]; 1 means identical, -1 inverted.
pub fn overlap(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> HopfieldResult<f64> {
    if a.len() != b.len() {
        return Err(HopfieldError::shape_mismatch(a.len(), b.len(), "overlap"));
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    Ok(a.dot(&b) / a.len() as f64)
}
