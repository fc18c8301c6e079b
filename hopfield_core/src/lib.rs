//! # Hopfield Core
//!
//! A deterministic associative-memory engine. A batch of bipolar patterns is
//! stored in a symmetric, zero-diagonal weight matrix with the Hebbian rule;
//! corrupted probes are reconstructed by energy-descending sweeps until the
//! state stops changing.
//!
//! ## Quick Start
//!
//! ```rust
//! use hopfield_core::{HopfieldNetwork, RecallOptions};
//! use ndarray::{arr1, arr2};
//!
//! let mut network = HopfieldNetwork::new(3, 3).unwrap();
//! network
//!     .train(&arr2(&[
//!         [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0],
//!         [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0],
//!     ]))
//!     .unwrap();
//!
//! let probe = arr1(&[1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
//! let outcome = network
//!     .recall(probe.view(), RecallOptions::asynchronous().with_max_iterations(100))
//!     .unwrap();
//! assert!(outcome.converged);
//! assert!(outcome.energy <= outcome.initial_energy);
//!
//! let info = network.training_info();
//! println!("{} patterns, usage {:.2}", info.n_patterns_trained, info.usage_ratio);
//! ```
//!
//! ## Core Modules
//!
//! - [`network`] - Hebbian training, recall engine, convergence, diagnostics
//! - [`pattern`] - Bipolar pattern validation
//! - [`config`] - Network configuration via TOML
//! - [`logging`] - JSON line-delimited run logs
//! - [`error`] - Error kinds shared by all operations

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod pattern;

pub use config::{ConfigError, LoggingConfig, NetworkConfig};
pub use error::{HopfieldError, HopfieldResult, ValidationKind};
pub use network::{
    capacity, energy, AssociativeMemory, ConvergenceChecker, HopfieldNetwork, RecallEngine,
    RecallOptions, RecallOutcome, RecallSummary, TrainingInfo, UpdateMode,
};
pub use pattern::{hamming_distance, overlap, validate_pattern, validate_patterns};
