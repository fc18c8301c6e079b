//! Error types for network construction, training and recall
//!
//! Every error is local to the call that raised it. None of them leave the
//! network in a partially updated state, so callers can correct the input
//! and retry (or retrain) without rebuilding anything.

use std::fmt;

use thiserror::Error;

/// Result type alias for network operations
pub type HopfieldResult<T> = Result<T, HopfieldError>;

/// Which input constraint a [`HopfieldError::Validation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Array has the wrong number of dimensions
    Rank,
    /// Pattern length does not match the neuron count
    Width,
    /// An element is neither -1 nor +1
    Values,
    /// Training batch contains no patterns
    Empty,
    /// Pattern dimensions are not strictly positive
    Dimensions,
    /// Convergence threshold outside (0, 1)
    Threshold,
    /// Iteration cap is zero
    Iterations,
    /// Any other configuration field out of range
    Config,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationKind::Rank => "rank",
            ValidationKind::Width => "width",
            ValidationKind::Values => "bipolar values",
            ValidationKind::Empty => "pattern count",
            ValidationKind::Dimensions => "dimensions",
            ValidationKind::Threshold => "convergence threshold",
            ValidationKind::Iterations => "iteration cap",
            ValidationKind::Config => "configuration",
        };
        f.write_str(name)
    }
}

/// Error type for Hopfield network operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HopfieldError {
    /// Malformed pattern or matrix, non-binary values, invalid threshold or dimensions
    #[error("Validation failed ({kind}): {details}")]
    Validation { kind: ValidationKind, details: String },

    /// The network is not in the state the operation requires
    #[error("Illegal state for '{operation}': {reason}")]
    IllegalState { operation: String, reason: String },

    /// Two vectors that must be combined have different lengths
    #[error("Shape mismatch in {context}: expected length {expected}, got {got}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        context: String,
    },
}

impl HopfieldError {
    /// Create a validation error for the given constraint
    pub fn validation(kind: ValidationKind, details: impl Into<String>) -> Self {
        HopfieldError::Validation {
            kind,
            details: details.into(),
        }
    }

    /// Create an illegal state error for `operation`
    pub fn illegal_state(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        HopfieldError::IllegalState {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create the error returned by operations that need trained weights
    pub fn not_trained(operation: impl Into<String>) -> Self {
        Self::illegal_state(operation, "network not trained")
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: usize, got: usize, context: impl Into<String>) -> Self {
        HopfieldError::ShapeMismatch {
            expected,
            got,
            context: context.into(),
        }
    }

    /// Constraint kind when this is a validation error
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            HopfieldError::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
