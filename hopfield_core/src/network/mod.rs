//! Hopfield associative memory.
//!
//! Patterns are learned in one batch with the Hebbian outer-product rule and
//! recalled by energy-descending sweeps until consecutive states stabilize.
//!
//! ```
//! use hopfield_core::HopfieldNetwork;
//! use ndarray::{arr1, arr2};
//!
//! let mut network = HopfieldNetwork::new(3, 3).unwrap();
//! network
//!     .train(&arr2(&[[1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0]]))
//!     .unwrap();
//!
//! let corrupted = arr1(&[1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
//! let restored = network.predict(&corrupted, Some(100)).unwrap();
//! assert_eq!(restored, arr1(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0]));
//! ```

pub mod convergence;
pub mod diagnostics;
pub mod recall;
pub mod trainer;

use std::fmt;

use ndarray::{Array1, Array2, ArrayD, ArrayView1};

use crate::config::NetworkConfig;
use crate::error::{HopfieldError, HopfieldResult, ValidationKind};
use crate::pattern::{
    validate_pattern, validate_pattern_dyn, validate_patterns, validate_patterns_dyn,
};

pub use convergence::ConvergenceChecker;
pub use diagnostics::{capacity, energy, TrainingInfo, CAPACITY_RATIO};
pub use recall::{
    activation_sign, RecallEngine, RecallOptions, RecallOutcome, RecallSummary, UpdateMode,
};
pub use trainer::{frobenius_norm, hebbian_weights, is_symmetric};

/// Capability interface for networks that store and reconstruct patterns.
pub trait AssociativeMemory {
    /// Learn `patterns` (shape `(P, N)`) from scratch and return the new weights.
    fn train(&mut self, patterns: &Array2<f64>) -> HopfieldResult<&Array2<f64>>;

    /// Reconstruct `probe` with the implementation's default settings.
    fn predict(&mut self, probe: &Array1<f64>) -> HopfieldResult<Array1<f64>>;

    fn is_trained(&self) -> bool;

    /// Copy of the current weights, `None` before training
    fn get_weights(&self) -> Option<Array2<f64>>;

    /// Forget everything learned.
    fn reset(&mut self);
}

/// A Hopfield network over `width × height` bipolar neurons.
///
/// The weight matrix is absent until [`HopfieldNetwork::train`] runs and is
/// replaced wholesale by every subsequent training call.
#[derive(Debug, Clone)]
pub struct HopfieldNetwork {
    pattern_size: (usize, usize),
    n_neurons: usize,
    weights: Option<Array2<f64>>,
    n_patterns_trained: usize,
    max_iterations: usize,
    use_convergence: bool,
    checker: ConvergenceChecker,
}

impl HopfieldNetwork {
    /// Untrained network with default recall settings.
    pub fn new(width: usize, height: usize) -> HopfieldResult<Self> {
        Self::with_config(&NetworkConfig::with_size(width, height))
    }

    /// Untrained network sized and tuned by `config`.
    pub fn with_config(config: &NetworkConfig) -> HopfieldResult<Self> {
        config.validate()?;
        let checker = ConvergenceChecker::new(config.convergence_threshold)?;
        let n_neurons = config.n_neurons();

        tracing::info!(
            n_neurons,
            width = config.width,
            height = config.height,
            "hopfield network initialized"
        );

        Ok(Self {
            pattern_size: config.pattern_size(),
            n_neurons,
            weights: None,
            n_patterns_trained: 0,
            max_iterations: config.max_iterations,
            use_convergence: config.use_convergence,
            checker,
        })
    }

    pub fn pattern_size(&self) -> (usize, usize) {
        self.pattern_size
    }

    pub fn n_neurons(&self) -> usize {
        self.n_neurons
    }

    pub fn n_patterns_trained(&self) -> usize {
        self.n_patterns_trained
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    /// Borrow the weights without copying.
    pub fn weights(&self) -> Option<&Array2<f64>> {
        self.weights.as_ref()
    }

    pub fn get_weights(&self) -> Option<Array2<f64>> {
        self.weights.clone()
    }

    /// Learn `patterns` with the Hebbian rule, replacing any previous weights.
    ///
    /// Storing more patterns than [`HopfieldNetwork::capacity`] only warns;
    /// recall quality degrades but training proceeds.
    pub fn train(&mut self, patterns: &Array2<f64>) -> HopfieldResult<&Array2<f64>> {
        validate_patterns(patterns.view(), self.n_neurons)?;

        let n_patterns = patterns.nrows();
        let capacity = self.capacity();
        if n_patterns as f64 > capacity {
            tracing::warn!(
                n_patterns,
                capacity,
                "pattern count exceeds theoretical capacity; recall may degrade"
            );
        }

        tracing::info!(n_patterns, "training network");
        let weights = hebbian_weights(patterns.view());

        if !is_symmetric(&weights) {
            tracing::warn!("trained weight matrix is not symmetric");
        }

        tracing::info!(
            weights_norm = frobenius_norm(&weights),
            "training completed"
        );

        self.n_patterns_trained = n_patterns;
        Ok(self.weights.insert(weights))
    }

    /// [`HopfieldNetwork::train`] for dynamic-rank input; anything other than
    /// a 2-D array is rejected.
    pub fn train_dyn(&mut self, patterns: &ArrayD<f64>) -> HopfieldResult<&Array2<f64>> {
        let view = validate_patterns_dyn(patterns.view(), self.n_neurons)?;
        self.train(&view.to_owned())
    }

    /// Reconstruct `probe` with asynchronous updates.
    ///
    /// `max_iterations` defaults to the configured cap.
    pub fn predict(
        &mut self,
        probe: &Array1<f64>,
        max_iterations: Option<usize>,
    ) -> HopfieldResult<Array1<f64>> {
        let options = RecallOptions {
            max_iterations,
            ..RecallOptions::asynchronous()
        };
        Ok(self.recall(probe.view(), options)?.state)
    }

    /// Like [`HopfieldNetwork::predict`], also returning the probe followed by
    /// the state after every sweep.
    pub fn predict_with_history(
        &mut self,
        probe: &Array1<f64>,
        max_iterations: Option<usize>,
    ) -> HopfieldResult<(Array1<f64>, Vec<Array1<f64>>)> {
        let options = RecallOptions {
            max_iterations,
            ..RecallOptions::asynchronous().with_history()
        };
        let outcome = self.recall(probe.view(), options)?;
        Ok((outcome.state, outcome.history.unwrap_or_default()))
    }

    /// Reconstruct `probe` with synchronous updates.
    pub fn predict_sync(
        &mut self,
        probe: &Array1<f64>,
        max_iterations: Option<usize>,
    ) -> HopfieldResult<Array1<f64>> {
        let options = RecallOptions {
            max_iterations,
            ..RecallOptions::synchronous()
        };
        Ok(self.recall(probe.view(), options)?.state)
    }

    /// [`HopfieldNetwork::predict`] for dynamic-rank input.
    pub fn predict_dyn(
        &mut self,
        probe: &ArrayD<f64>,
        max_iterations: Option<usize>,
    ) -> HopfieldResult<Array1<f64>> {
        self.ensure_trained("predict")?;
        let view = validate_pattern_dyn(probe.view(), self.n_neurons)?;
        self.predict(&view.to_owned(), max_iterations)
    }

    /// Full recall run with explicit options.
    pub fn recall(
        &mut self,
        probe: ArrayView1<'_, f64>,
        options: RecallOptions,
    ) -> HopfieldResult<RecallOutcome> {
        let weights = self
            .weights
            .as_ref()
            .ok_or_else(|| HopfieldError::not_trained("predict"))?;
        validate_pattern(probe, self.n_neurons)?;

        let max_iterations = options.max_iterations.unwrap_or(self.max_iterations);
        if max_iterations == 0 {
            return Err(HopfieldError::validation(
                ValidationKind::Iterations,
                "max_iterations must be at least 1",
            ));
        }

        tracing::debug!(max_iterations, mode = %options.mode, "starting recall");
        let outcome = RecallEngine::new(weights, &mut self.checker, self.use_convergence).run(
            probe,
            max_iterations,
            options.mode,
            options.record_history,
        )?;

        tracing::info!(
            energy = outcome.energy,
            iterations = outcome.iterations,
            converged = outcome.converged,
            "recall completed"
        );
        Ok(outcome)
    }

    /// Energy `-0.5 · sᵗ·W·s` of `state` under the current weights.
    pub fn energy(&self, state: &Array1<f64>) -> HopfieldResult<f64> {
        let weights = self.ensure_trained("energy")?;
        if state.len() != self.n_neurons {
            return Err(HopfieldError::shape_mismatch(
                self.n_neurons,
                state.len(),
                "energy",
            ));
        }
        energy(weights, state.view())
    }

    /// Normalized change of every sweep in the most recent recall run.
    pub fn convergence_history(&self) -> &[f64] {
        self.checker.history()
    }

    pub fn reset(&mut self) {
        self.weights = None;
        self.n_patterns_trained = 0;
        self.checker.reset();
        tracing::info!("network reset");
    }

    /// Theoretical capacity `0.138 · n_neurons`.
    pub fn capacity(&self) -> f64 {
        capacity(self.n_neurons)
    }

    pub fn training_info(&self) -> TrainingInfo {
        let capacity = self.capacity();
        let (usage_ratio, weights_norm) = match &self.weights {
            Some(weights) => (
                self.n_patterns_trained as f64 / capacity,
                frobenius_norm(weights),
            ),
            None => (0.0, 0.0),
        };

        TrainingInfo {
            is_trained: self.is_trained(),
            n_neurons: self.n_neurons,
            pattern_size: self.pattern_size,
            n_patterns_trained: self.n_patterns_trained,
            capacity,
            usage_ratio,
            weights_norm,
        }
    }

    fn ensure_trained(&self, operation: &str) -> HopfieldResult<&Array2<f64>> {
        self.weights
            .as_ref()
            .ok_or_else(|| HopfieldError::not_trained(operation))
    }
}

impl AssociativeMemory for HopfieldNetwork {
    fn train(&mut self, patterns: &Array2<f64>) -> HopfieldResult<&Array2<f64>> {
        HopfieldNetwork::train(self, patterns)
    }

    fn predict(&mut self, probe: &Array1<f64>) -> HopfieldResult<Array1<f64>> {
        HopfieldNetwork::predict(self, probe, None)
    }

    fn is_trained(&self) -> bool {
        HopfieldNetwork::is_trained(self)
    }

    fn get_weights(&self) -> Option<Array2<f64>> {
        HopfieldNetwork::get_weights(self)
    }

    fn reset(&mut self) {
        HopfieldNetwork::reset(self)
    }
}

impl fmt::Display for HopfieldNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_trained() {
            "trained"
        } else {
            "untrained"
        };
        write!(
            f,
            "HopfieldNetwork(neurons={}, patterns={}, status={})",
            self.n_neurons, self.n_patterns_trained, status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn checkerboard_pair() -> Array2<f64> {
        arr2(&[
            [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0],
        ])
    }

    #[test]
    fn new_network_is_untrained() {
        let network = HopfieldNetwork::new(3, 3).unwrap();
        assert_eq!(network.n_neurons(), 9);
        assert_eq!(network.pattern_size(), (3, 3));
        assert!(!network.is_trained());
        assert!(network.get_weights().is_none());
    }

    #[test]
    fn rejects_zero_dimensions() {
        for (w, h) in [(0, 3), (3, 0), (0, 0)] {
            let err = HopfieldNetwork::new(w, h).unwrap_err();
            assert_eq!(err.validation_kind(), Some(ValidationKind::Dimensions));
        }

        let err = HopfieldNetwork::new(usize::MAX, 2).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::Dimensions));
    }

    #[test]
    fn train_produces_symmetric_zero_diagonal_weights() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        let weights = network.train(&checkerboard_pair()).unwrap().clone();
        assert_eq!(weights.dim(), (9, 9));
        assert!(weights.diag().iter().all(|&w| w == 0.0));
        assert_eq!(weights, weights.t());
        assert!(network.is_trained());
    }

    #[test]
    fn train_rejects_invalid_batches_without_touching_state() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        network.train(&checkerboard_pair()).unwrap();
        let before = network.get_weights();

        let wrong_width = arr2(&[[1.0, -1.0, 1.0]]);
        let err = network.train(&wrong_width).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::Width));

        let mut non_binary = checkerboard_pair();
        non_binary[[1, 4]] = 0.0;
        let err = network.train(&non_binary).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::Values));

        assert_eq!(network.get_weights(), before);
        assert_eq!(network.n_patterns_trained(), 2);
    }

    #[test]
    fn retraining_replaces_weights() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        network.train(&checkerboard_pair()).unwrap();
        let single = arr2(&[[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]]);
        let weights = network.train(&single).unwrap();
        assert!(weights.iter().all(|&w| w == 0.0 || w == 1.0));
        assert_eq!(network.n_patterns_trained(), 1);
    }

    #[test]
    fn predict_before_training_is_illegal_state() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        let probe = arr1(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
        let err = network.predict(&probe, None).unwrap_err();
        assert!(matches!(err, HopfieldError::IllegalState { .. }));
        assert!(err.to_string().contains("network not trained"));

        // trained-state check comes before probe validation
        let bad = arr1(&[0.0]);
        assert!(matches!(
            network.predict_sync(&bad, None),
            Err(HopfieldError::IllegalState { .. })
        ));
    }

    #[test]
    fn predict_validates_probe_and_cap() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        network.train(&checkerboard_pair()).unwrap();

        let short = arr1(&[1.0, -1.0]);
        assert_eq!(
            network.predict(&short, None).unwrap_err().validation_kind(),
            Some(ValidationKind::Width)
        );

        let probe = checkerboard_pair().row(0).to_owned();
        assert_eq!(
            network.predict(&probe, Some(0)).unwrap_err().validation_kind(),
            Some(ValidationKind::Iterations)
        );
    }

    #[test]
    fn history_starts_with_probe() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        network.train(&checkerboard_pair()).unwrap();
        let probe = arr1(&[1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);

        let (state, history) = network.predict_with_history(&probe, Some(100)).unwrap();
        assert_eq!(history[0], probe);
        assert_eq!(history.last(), Some(&state));
        assert_eq!(history.len(), network.convergence_history().len() + 1);
    }

    #[test]
    fn dynamic_input_is_rank_checked() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        let flat = checkerboard_pair().into_shape(18).unwrap().into_dyn();
        let err = network.train_dyn(&flat).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::Rank));

        network.train_dyn(&checkerboard_pair().into_dyn()).unwrap();
        let probe = checkerboard_pair().into_dyn();
        let err = network.predict_dyn(&probe, None).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::Rank));
    }

    #[test]
    fn energy_requires_training_and_matching_length() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        let probe = checkerboard_pair().row(0).to_owned();
        assert!(matches!(
            network.energy(&probe),
            Err(HopfieldError::IllegalState { .. })
        ));

        network.train(&checkerboard_pair()).unwrap();
        assert!(matches!(
            network.energy(&arr1(&[1.0])),
            Err(HopfieldError::ShapeMismatch { .. })
        ));
        // a stored pattern of 9 neurons sits at -0.5 · 9 · 8
        assert!((network.energy(&probe).unwrap() + 36.0).abs() < 1e-9);
    }

    #[test]
    fn reset_returns_to_untrained() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        network.train(&checkerboard_pair()).unwrap();
        network
            .predict(&checkerboard_pair().row(1).to_owned(), Some(10))
            .unwrap();
        assert!(!network.convergence_history().is_empty());

        network.reset();
        assert!(!network.is_trained());
        assert!(network.get_weights().is_none());
        assert!(network.convergence_history().is_empty());
        assert_eq!(network.training_info().n_patterns_trained, 0);
    }

    #[test]
    fn training_info_before_and_after() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        let info = network.training_info();
        assert!(!info.is_trained);
        assert_eq!(info.usage_ratio, 0.0);
        assert_eq!(info.weights_norm, 0.0);

        network.train(&checkerboard_pair()).unwrap();
        let info = network.training_info();
        assert!(info.is_trained);
        assert_eq!(info.n_neurons, 9);
        assert_eq!(info.pattern_size, (3, 3));
        assert_eq!(info.n_patterns_trained, 2);
        assert_eq!(info.capacity, 0.138 * 9.0);
        assert!((info.usage_ratio - 2.0 / (0.138 * 9.0)).abs() < 1e-12);
        assert!(info.is_over_capacity());
        // 72 off-diagonal entries of magnitude 1
        assert!((info.weights_norm - 72f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn training_beyond_capacity_still_replaces_weights() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        let before = network.train(&checkerboard_pair()).unwrap().clone();

        let mut patterns = Array2::from_elem((3, 9), 1.0);
        patterns.row_mut(0).assign(&checkerboard_pair().row(0));
        patterns.row_mut(1).assign(&checkerboard_pair().row(1));
        assert!(patterns.nrows() as f64 > network.capacity());

        let weights = network.train(&patterns).unwrap().clone();
        assert_ne!(weights, before);
        assert_eq!(weights, hebbian_weights(patterns.view()));

        let info = network.training_info();
        assert_eq!(info.n_patterns_trained, 3);
        assert!(info.is_over_capacity());
        assert!((info.usage_ratio - 3.0 / (0.138 * 9.0)).abs() < 1e-12);
    }

    #[test]
    fn display_reports_status() {
        let mut network = HopfieldNetwork::new(3, 3).unwrap();
        assert_eq!(
            network.to_string(),
            "HopfieldNetwork(neurons=9, patterns=0, status=untrained)"
        );
        network.train(&checkerboard_pair()).unwrap();
        assert_eq!(
            network.to_string(),
            "HopfieldNetwork(neurons=9, patterns=2, status=trained)"
        );
    }

    #[test]
    fn trait_object_drives_the_network() {
        let mut memory: Box<dyn AssociativeMemory> =
            Box::new(HopfieldNetwork::new(3, 3).unwrap());
        assert!(!memory.is_trained());
        memory.train(&checkerboard_pair()).unwrap();
        let probe = checkerboard_pair().row(0).to_owned();
        assert_eq!(memory.predict(&probe).unwrap(), probe);
        memory.reset();
        assert!(memory.get_weights().is_none());
    }
}
