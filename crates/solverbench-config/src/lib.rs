//! Configuration system for SolverBench.
//!
//! Load solver and benchmark configuration from TOML or YAML files.
//!
//! # Examples
//!
//! Load a solver configuration from a TOML string:
//!
//! ```
//! use solverbench_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     step_count_limit = 500
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(7));
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use solverbench_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use solverbench_core::SolverBenchError;
use thiserror::Error;

mod benchmark;

pub use benchmark::{BenchmarkConfig, StatisticType};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for SolverBenchError {
    fn from(err: ConfigError) -> Self {
        SolverBenchError::Config(err.to_string())
    }
}

/// Main solver configuration.
///
/// Cloning produces a fully independent deep copy; the benchmark harness relies
/// on that to give each run an untouched configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Score director configuration.
    #[serde(default)]
    pub score_director: Option<ScoreDirectorConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the step count limit.
    pub fn with_step_count_limit(mut self, steps: u64) -> Self {
        self.termination = Some(TerminationConfig {
            step_count_limit: Some(steps),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Enables or disables constraint match tracking in the score director.
    pub fn with_constraint_match_enabled(mut self, enabled: bool) -> Self {
        self.score_director = Some(ScoreDirectorConfig {
            constraint_match_enabled: enabled,
            ..self.score_director.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the step count limit, if configured.
    pub fn step_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.step_count_limit)
    }

    /// Returns whether the score director should track constraint matches.
    pub fn constraint_match_enabled(&self) -> bool {
        self.score_director
            .as_ref()
            .is_some_and(|d| d.constraint_match_enabled)
    }

    /// Derives a seed from a sub-single benchmark index.
    ///
    /// Sets `random_seed` to the index when no seed is configured and the
    /// environment mode is reproducible. An explicit seed always wins, and a
    /// non-reproducible configuration keeps drawing from entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use solverbench_config::SolverConfig;
    ///
    /// let mut config = SolverConfig::new();
    /// config.offer_random_seed_from_sub_single_index(3);
    /// assert_eq!(config.random_seed, Some(3));
    ///
    /// let mut seeded = SolverConfig::new().with_random_seed(42);
    /// seeded.offer_random_seed_from_sub_single_index(3);
    /// assert_eq!(seeded.random_seed, Some(42));
    /// ```
    pub fn offer_random_seed_from_sub_single_index(&mut self, sub_single_index: usize) {
        if self.environment_mode.is_reproducible() && self.random_seed.is_none() {
            self.random_seed = Some(sub_single_index as u64);
        }
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    #[default]
    Reproducible,

    /// Fast assert mode with basic assertions.
    FastAssert,

    /// Full assert mode with comprehensive assertions.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true unless the mode trades reproducibility for speed.
    pub fn is_reproducible(&self) -> bool {
        !matches!(self, EnvironmentMode::NonReproducible)
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum number of steps.
    pub step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds = self
            .minutes_spent_limit
            .unwrap_or(0)
            .saturating_mul(60)
            .saturating_add(self.seconds_spent_limit.unwrap_or(0));
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

/// Score director configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreDirectorConfig {
    /// Name of the constraint provider type.
    pub constraint_provider: Option<String>,

    /// Whether to track individual constraint matches.
    #[serde(default)]
    pub constraint_match_enabled: bool,
}
