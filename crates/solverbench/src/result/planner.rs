//! Planner benchmark result.

use std::sync::Arc;

use solverbench_config::BenchmarkConfig;

use crate::memory::{MemoryProbe, SystemMemoryProbe};

/// Top-level record of a benchmark.
///
/// Knows whether sibling runs may execute at the same time and owns the
/// memory probe consulted when they do not.
#[derive(Debug, Clone)]
pub struct PlannerBenchmarkResult {
    name: String,
    parallel_benchmark_count: usize,
    memory_probe: Arc<dyn MemoryProbe>,
}

impl PlannerBenchmarkResult {
    /// Creates a planner result probing memory with [`SystemMemoryProbe`].
    pub fn new(name: impl Into<String>, parallel_benchmark_count: usize) -> Self {
        Self {
            name: name.into(),
            parallel_benchmark_count,
            memory_probe: Arc::new(SystemMemoryProbe::new()),
        }
    }

    /// Creates a planner result from benchmark configuration.
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(config.name(), config.parallel_benchmark_count())
    }

    /// Replaces the memory probe.
    pub fn with_memory_probe(mut self, memory_probe: Arc<dyn MemoryProbe>) -> Self {
        self.memory_probe = memory_probe;
        self
    }

    /// Returns the benchmark name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how many runs may execute at the same time.
    pub fn parallel_benchmark_count(&self) -> usize {
        self.parallel_benchmark_count
    }

    /// Returns true if more than one run may execute at the same time.
    pub fn has_multiple_parallel_benchmarks(&self) -> bool {
        self.parallel_benchmark_count > 1
    }

    /// Returns the memory probe.
    pub fn memory_probe(&self) -> &dyn MemoryProbe {
        self.memory_probe.as_ref()
    }
}
