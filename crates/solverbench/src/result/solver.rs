//! Solver benchmark result.

use solverbench_config::SolverConfig;

/// A named solver configuration together with the factory that builds it.
///
/// The configuration is never handed out mutably: each run clones it before
/// deriving anything from it.
#[derive(Debug)]
pub struct SolverBenchmarkResult<F> {
    name: String,
    solver_config: SolverConfig,
    solver_factory: F,
}

impl<F> SolverBenchmarkResult<F> {
    /// Creates a solver benchmark.
    pub fn new(name: impl Into<String>, solver_config: SolverConfig, solver_factory: F) -> Self {
        Self {
            name: name.into(),
            solver_config,
            solver_factory,
        }
    }

    /// Returns the solver name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configuration every run starts from.
    pub fn solver_config(&self) -> &SolverConfig {
        &self.solver_config
    }

    /// Returns the solver factory.
    pub fn solver_factory(&self) -> &F {
        &self.solver_factory
    }
}
