//! Network configuration via TOML files.
//!
//! Configuration is an explicit value handed to [`crate::HopfieldNetwork`];
//! there is no process-wide settings object. Missing sections or keys fall
//! back to the defaults below.
//!
//! ```toml
//! [pattern]
//! width = 44
//! height = 60
//!
//! [network]
//! max_iterations = 2000
//! convergence_threshold = 0.001
//! use_convergence = true
//! default_patterns = 4
//!
//! [logging]
//! directory = "logs"
//! level = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{HopfieldError, HopfieldResult, ValidationKind};

pub const DEFAULT_WIDTH: usize = 44;
pub const DEFAULT_HEIGHT: usize = 60;
pub const DEFAULT_MAX_ITERATIONS: usize = 2000;
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.001;
pub const DEFAULT_PATTERNS: usize = 4;

/// Complete configuration for a network and its run logs.
///
/// # Examples
///
/// ```
/// use hopfield_core::NetworkConfig;
///
/// let config = NetworkConfig::from_str("[pattern]\nwidth = 3\nheight = 3").unwrap();
/// assert_eq!(config.n_neurons(), 9);
/// assert_eq!(config.max_iterations, 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkConfig {
    /// Pattern width in pixels
    pub width: usize,
    /// Pattern height in pixels
    pub height: usize,
    /// Default sweep cap for recall
    pub max_iterations: usize,
    /// Normalized change below which recall is considered converged
    pub convergence_threshold: f64,
    /// Stop early once consecutive sweeps stabilize
    pub use_convergence: bool,
    /// Number of patterns a front end loads by default
    pub default_patterns: usize,
    pub logging: LoggingConfig,
}

/// Where and how verbosely runs are logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingConfig {
    /// Directory receiving the JSON-lines run logs
    pub directory: PathBuf,
    /// Default `tracing` filter directive
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            level: "info".to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
            use_convergence: true,
            default_patterns: DEFAULT_PATTERNS,
            logging: LoggingConfig::default(),
        }
    }
}

impl NetworkConfig {
    /// Default configuration for a `width × height` pattern.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_str(&contents)
    }

    /// Parse and validate a configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let defaults = Self::default();

        let config = Self {
            width: raw.pattern.width.unwrap_or(defaults.width),
            height: raw.pattern.height.unwrap_or(defaults.height),
            max_iterations: raw.network.max_iterations.unwrap_or(defaults.max_iterations),
            convergence_threshold: raw
                .network
                .convergence_threshold
                .unwrap_or(defaults.convergence_threshold),
            use_convergence: raw
                .network
                .use_convergence
                .unwrap_or(defaults.use_convergence),
            default_patterns: raw
                .network
                .default_patterns
                .unwrap_or(defaults.default_patterns),
            logging: LoggingConfig {
                directory: raw
                    .logging
                    .directory
                    .unwrap_or(defaults.logging.directory),
                level: raw.logging.level.unwrap_or(defaults.logging.level),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> HopfieldResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HopfieldError::validation(
                ValidationKind::Dimensions,
                format!(
                    "pattern dimensions must be positive, got {}x{}",
                    self.width, self.height
                ),
            ));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(HopfieldError::validation(
                ValidationKind::Dimensions,
                format!(
                    "pattern dimensions {}x{} overflow the neuron count",
                    self.width, self.height
                ),
            ));
        }
        if self.max_iterations == 0 {
            return Err(HopfieldError::validation(
                ValidationKind::Iterations,
                "max_iterations must be positive",
            ));
        }
        if self.default_patterns == 0 {
            return Err(HopfieldError::validation(
                ValidationKind::Config,
                "default_patterns must be positive",
            ));
        }
        if !(self.convergence_threshold > 0.0 && self.convergence_threshold < 1.0) {
            return Err(HopfieldError::validation(
                ValidationKind::Threshold,
                format!(
                    "convergence_threshold must be in (0, 1), got {}",
                    self.convergence_threshold
                ),
            ));
        }
        Ok(())
    }

    pub fn pattern_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn n_neurons(&self) -> usize {
        self.width * self.height
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    pattern: RawPattern,
    network: RawNetwork,
    logging: RawLogging,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawPattern {
    width: Option<usize>,
    height: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawNetwork {
    max_iterations: Option<usize>,
    convergence_threshold: Option<f64>,
    use_convergence: Option<bool>,
    default_patterns: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLogging {
    directory: Option<PathBuf>,
    level: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] HopfieldError),
}
