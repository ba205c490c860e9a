//! Benchmark configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Kind of time series a sub-single statistic collects.
///
/// The declaration order is the order in which statistics are opened and
/// closed around a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticType {
    /// Best score over time.
    BestScore,
    /// Step score over time.
    StepScore,
    /// Score calculations per second over time.
    ScoreCalculationSpeed,
    /// Accepted and selected move counts per step.
    MoveCountPerStep,
}

impl StatisticType {
    /// Returns the snake_case name used in file names and logs.
    pub fn name(&self) -> &'static str {
        match self {
            StatisticType::BestScore => "best_score",
            StatisticType::StepScore => "step_score",
            StatisticType::ScoreCalculationSpeed => "score_calculation_speed",
            StatisticType::MoveCountPerStep => "move_count_per_step",
        }
    }
}

/// Configuration for a benchmark.
///
/// Controls warmup iterations, the number of sub-single runs per solver and
/// problem pair, and which statistics each run collects.
///
/// # Example
///
/// ```
/// use solverbench_config::{BenchmarkConfig, StatisticType};
///
/// let config = BenchmarkConfig::new("NQueens Benchmark")
///     .with_warmup_count(2)
///     .with_sub_single_count(5)
///     .with_statistic(StatisticType::BestScore);
///
/// assert_eq!(config.name(), "NQueens Benchmark");
/// assert_eq!(config.warmup_count(), 2);
/// assert_eq!(config.sub_single_count(), 5);
/// assert!(!config.has_multiple_parallel_benchmarks());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BenchmarkConfig {
    name: String,
    #[serde(default = "default_warmup_count")]
    warmup_count: usize,
    #[serde(default = "default_count")]
    sub_single_count: usize,
    #[serde(default = "default_count")]
    parallel_benchmark_count: usize,
    #[serde(default)]
    statistics: Vec<StatisticType>,
}

fn default_warmup_count() -> usize {
    1
}

fn default_count() -> usize {
    1
}

impl BenchmarkConfig {
    /// Creates a new benchmark configuration with the given name.
    ///
    /// Defaults:
    /// - warmup_count: 1
    /// - sub_single_count: 1
    /// - parallel_benchmark_count: 1
    /// - no statistics
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            warmup_count: default_warmup_count(),
            sub_single_count: default_count(),
            parallel_benchmark_count: default_count(),
            statistics: Vec::new(),
        }
    }

    /// Loads a benchmark configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a benchmark configuration from a TOML string and validates it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the number of warmup runs (not measured).
    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.warmup_count = count;
        self
    }

    /// Sets the number of measured runs per solver and problem pair.
    pub fn with_sub_single_count(mut self, count: usize) -> Self {
        self.sub_single_count = count;
        self
    }

    /// Sets how many benchmarks the dispatcher runs at the same time.
    pub fn with_parallel_benchmark_count(mut self, count: usize) -> Self {
        self.parallel_benchmark_count = count;
        self
    }

    /// Adds a statistic collected during every run.
    ///
    /// Adding the same statistic twice has no effect.
    pub fn with_statistic(mut self, statistic: StatisticType) -> Self {
        if !self.statistics.contains(&statistic) {
            self.statistics.push(statistic);
        }
        self
    }

    /// Checks the counts are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sub_single_count == 0 {
            return Err(ConfigError::Invalid(format!(
                "benchmark ({}) has sub_single_count 0, it must be at least 1",
                self.name
            )));
        }
        if self.parallel_benchmark_count == 0 {
            return Err(ConfigError::Invalid(format!(
                "benchmark ({}) has parallel_benchmark_count 0, it must be at least 1",
                self.name
            )));
        }
        Ok(())
    }

    /// Returns the benchmark name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of warmup runs.
    pub fn warmup_count(&self) -> usize {
        self.warmup_count
    }

    /// Returns the number of measured runs per solver and problem pair.
    pub fn sub_single_count(&self) -> usize {
        self.sub_single_count
    }

    /// Returns the number of benchmarks run at the same time.
    pub fn parallel_benchmark_count(&self) -> usize {
        self.parallel_benchmark_count
    }

    /// Returns true if sibling runs share the process while measuring.
    pub fn has_multiple_parallel_benchmarks(&self) -> bool {
        self.parallel_benchmark_count > 1
    }

    /// Returns the configured statistics, in declaration order.
    pub fn statistics(&self) -> &[StatisticType] {
        &self.statistics
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new("Benchmark")
    }
}
