//! Iterative reconstruction of a probe pattern.
//!
//! Two update schedules are supported:
//!
//! - **Asynchronous**: neurons are updated one at a time in index order and
//!   every update is visible to the neurons after it in the same sweep. Each
//!   single flip never raises the energy, so this schedule always settles.
//! - **Synchronous**: the whole state is recomputed from the frozen previous
//!   sweep. It can oscillate between two states forever, in which case only
//!   the iteration cap ends the run.
//!
//! Neither schedule draws random numbers; identical inputs give identical
//! outputs.

use std::fmt;

use ndarray::{Array1, Array2, ArrayView1};
use serde::Serialize;

use crate::error::{HopfieldError, HopfieldResult};
use crate::network::convergence::ConvergenceChecker;
use crate::network::diagnostics::energy;

/// Neuron update schedule used during recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Neuron-by-neuron in index order
    #[default]
    Asynchronous,
    /// All neurons at once from the previous state
    Synchronous,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMode::Asynchronous => f.write_str("asynchronous"),
            UpdateMode::Synchronous => f.write_str("synchronous"),
        }
    }
}

/// Per-call recall settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecallOptions {
    /// Sweep cap; `None` falls back to the network's configured cap
    pub max_iterations: Option<usize>,
    pub mode: UpdateMode,
    /// Keep a copy of the state after every sweep
    pub record_history: bool,
}

impl RecallOptions {
    pub fn asynchronous() -> Self {
        Self::default()
    }

    pub fn synchronous() -> Self {
        Self {
            mode: UpdateMode::Synchronous,
            ..Self::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_history(mut self) -> Self {
        self.record_history = true;
        self
    }
}

/// Everything a recall run produced.
#[derive(Debug, Clone)]
pub struct RecallOutcome {
    /// Reconstructed pattern
    pub state: Array1<f64>,
    /// Probe followed by the state after each sweep, when requested
    pub history: Option<Vec<Array1<f64>>>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Whether the run stopped because consecutive states stabilized
    pub converged: bool,
    pub initial_energy: f64,
    pub energy: f64,
    pub mode: UpdateMode,
}

impl RecallOutcome {
    pub fn summary(&self) -> RecallSummary {
        RecallSummary {
            mode: self.mode,
            iterations: self.iterations,
            converged: self.converged,
            initial_energy: self.initial_energy,
            final_energy: self.energy,
        }
    }
}

/// Serializable digest of a [`RecallOutcome`] for run logs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecallSummary {
    pub mode: UpdateMode,
    pub iterations: usize,
    pub converged: bool,
    pub initial_energy: f64,
    pub final_energy: f64,
}

/// Sign activation; an activation of exactly zero maps to -1.
#[inline]
pub fn activation_sign(activation: f64) -> f64 {
    if activation > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Drives the sweeps of one recall run against a fixed weight matrix.
///
/// The engine borrows the weights and the checker for the duration of the
/// run. Shapes are checked on entry; probe values are not.
pub struct RecallEngine<'a> {
    weights: &'a Array2<f64>,
    checker: &'a mut ConvergenceChecker,
    use_convergence: bool,
}

impl<'a> RecallEngine<'a> {
    pub fn new(
        weights: &'a Array2<f64>,
        checker: &'a mut ConvergenceChecker,
        use_convergence: bool,
    ) -> Self {
        Self {
            weights,
            checker,
            use_convergence,
        }
    }

    /// Run at most `max_iterations` sweeps starting from `probe`.
    pub fn run(
        &mut self,
        probe: ArrayView1<'_, f64>,
        max_iterations: usize,
        mode: UpdateMode,
        record_history: bool,
    ) -> HopfieldResult<RecallOutcome> {
        let (rows, cols) = self.weights.dim();
        if rows != cols {
            return Err(HopfieldError::shape_mismatch(rows, cols, "recall weights"));
        }
        if probe.len() != rows {
            return Err(HopfieldError::shape_mismatch(rows, probe.len(), "recall"));
        }

        let mut state = probe.to_owned();
        let initial_energy = energy(self.weights, state.view())?;
        let mut history = record_history.then(|| vec![state.clone()]);

        self.checker.reset();

        let mut iterations = 0;
        let mut converged = false;

        for iteration in 0..max_iterations {
            let previous = state.clone();

            match mode {
                UpdateMode::Asynchronous => self.sweep_async(&mut state),
                UpdateMode::Synchronous => state = self.sweep_sync(previous.view()),
            }
            iterations = iteration + 1;

            if let Some(history) = history.as_mut() {
                history.push(state.clone());
            }

            if self.use_convergence && self.checker.check(state.view(), previous.view())? {
                tracing::debug!(iteration = iterations, %mode, "recall converged");
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::debug!(max_iterations, %mode, "recall reached iteration cap");
        }

        let final_energy = energy(self.weights, state.view())?;

        Ok(RecallOutcome {
            state,
            history,
            iterations,
            converged,
            initial_energy,
            energy: final_energy,
            mode,
        })
    }

    /// One in-place sweep; later neurons see earlier updates.
    fn sweep_async(&self, state: &mut Array1<f64>) {
        for i in 0..state.len() {
            let activation = self.weights.row(i).dot(&*state);
            state[i] = activation_sign(activation);
        }
    }

    /// One sweep computed entirely from `previous`.
    fn sweep_sync(&self, previous: ArrayView1<'_, f64>) -> Array1<f64> {
        self.weights.dot(&previous).mapv(activation_sign)
    }
}
