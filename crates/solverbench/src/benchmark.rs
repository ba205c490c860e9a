//! Sequential benchmark dispatcher.

use std::fmt;
use std::sync::Arc;

use solverbench_config::{BenchmarkConfig, SolverConfig};
use solverbench_core::{PlanningSolution, Result, SolverBenchError};
use tracing::{error, info, warn};

use crate::memory::MemoryProbe;
use crate::result::{
    PlannerBenchmarkResult, ProblemBenchmarkResult, ProblemIo, SingleBenchmarkResult,
    SolverBenchmarkResult,
};
use crate::solver::SolverFactory;

/// Runs every solver against every problem, one run at a time.
///
/// For each single benchmark (solver x problem) the runner executes
/// `warmup_count` warm-up runs followed by one measured run per sub-single.
/// A failing run is recorded on its sub-single result and the runner moves
/// on to the next one.
///
/// # Type Parameters
///
/// * `S` - The planning solution type
/// * `F` - Solver factory shared by every solver configuration
/// * `P` - Problem I/O shared by every problem
///
/// # Example
///
/// ```text
/// let mut runner = BenchmarkRunner::new(BenchmarkConfig::new("NQueens"))?;
/// runner
///     .add_solver("hill_climbing", SolverConfig::new(), HillClimbingFactory::new())
///     .add_problem("8-queens", FnProblemIo::new(|| NQueens::new(8)));
/// let summary = runner.run()?;
/// println!("{summary}");
/// ```
pub struct BenchmarkRunner<S: PlanningSolution, F, P> {
    config: BenchmarkConfig,
    planner: Arc<PlannerBenchmarkResult>,
    solvers: Vec<Arc<SolverBenchmarkResult<F>>>,
    problems: Vec<Arc<ProblemBenchmarkResult<S, P>>>,
    single_results: Vec<SingleBenchmarkResult<S, F, P>>,
}

impl<S, F, P> BenchmarkRunner<S, F, P>
where
    S: PlanningSolution,
    F: SolverFactory<S>,
    P: ProblemIo<S>,
{
    /// Creates a runner measuring memory of the current process.
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        let planner = Arc::new(PlannerBenchmarkResult::from_config(&config));
        Ok(Self::with_planner(config, planner))
    }

    /// Creates a runner measuring memory with `memory_probe`.
    pub fn with_memory_probe(config: BenchmarkConfig, memory_probe: Arc<dyn MemoryProbe>) -> Result<Self> {
        config.validate()?;
        let planner = Arc::new(PlannerBenchmarkResult::from_config(&config).with_memory_probe(memory_probe));
        Ok(Self::with_planner(config, planner))
    }

    fn with_planner(config: BenchmarkConfig, planner: Arc<PlannerBenchmarkResult>) -> Self {
        Self {
            config,
            planner,
            solvers: Vec::new(),
            problems: Vec::new(),
            single_results: Vec::new(),
        }
    }

    /// Adds a solver configuration.
    pub fn add_solver(
        &mut self,
        name: impl Into<String>,
        solver_config: SolverConfig,
        solver_factory: F,
    ) -> &mut Self {
        self.solvers.push(Arc::new(SolverBenchmarkResult::new(
            name,
            solver_config,
            solver_factory,
        )));
        self
    }

    /// Adds a problem instance.
    pub fn add_problem(&mut self, name: impl Into<String>, problem_io: P) -> &mut Self {
        self.problems.push(Arc::new(ProblemBenchmarkResult::new(
            name,
            problem_io,
            self.planner.clone(),
        )));
        self
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn planner_result(&self) -> &PlannerBenchmarkResult {
        &self.planner
    }

    pub fn problem_results(&self) -> &[Arc<ProblemBenchmarkResult<S, P>>] {
        &self.problems
    }

    /// Returns the single benchmarks of the last `run`.
    pub fn single_results(&self) -> &[SingleBenchmarkResult<S, F, P>] {
        &self.single_results
    }

    /// Runs the benchmark.
    ///
    /// Fails only if the benchmark cannot be set up; run failures are
    /// recorded on the results and counted in the summary.
    pub fn run(&mut self) -> Result<BenchmarkSummary> {
        if self.solvers.is_empty() || self.problems.is_empty() {
            return Err(SolverBenchError::InvalidState(format!(
                "benchmark ({}) needs at least one solver and one problem",
                self.config.name()
            )));
        }
        self.single_results = self.create_single_results()?;

        info!(
            event = "benchmark_start",
            name = self.config.name(),
            single_count = self.single_results.len(),
            warmup_count = self.config.warmup_count(),
            sub_single_count = self.config.sub_single_count(),
        );

        let mut summary = BenchmarkSummary::new(self.config.name(), self.single_results.len());
        for single in &mut self.single_results {
            for _ in 0..self.config.warmup_count() {
                let mut scratch = single.new_warm_up_result();
                let mut runner = single.warm_up_runner(&mut scratch);
                let outcome = runner.call().map(|_| ());
                summary.warm_up_count += 1;
                if let Err(err) = outcome {
                    warn!(event = "warm_up_failed", single = single.name(), error = %err);
                    summary.warm_up_failure_count += 1;
                }
            }
            for mut runner in single.runners() {
                summary.run_count += 1;
                if let Err(err) = runner.call().map(|_| ()) {
                    error!(event = "run_failed", sub_single = runner.name(), error = %err);
                    runner.set_failure(err);
                    summary.failure_count += 1;
                }
            }
        }

        info!(
            event = "benchmark_end",
            name = self.config.name(),
            run_count = summary.run_count,
            failure_count = summary.failure_count,
        );
        Ok(summary)
    }

    fn create_single_results(&self) -> Result<Vec<SingleBenchmarkResult<S, F, P>>> {
        let mut single_results = Vec::with_capacity(self.solvers.len() * self.problems.len());
        for solver in &self.solvers {
            for problem in &self.problems {
                single_results.push(SingleBenchmarkResult::new(
                    solver.clone(),
                    problem.clone(),
                    self.config.sub_single_count(),
                    self.config.statistics(),
                )?);
            }
        }
        Ok(single_results)
    }
}

impl<S: PlanningSolution, F, P> fmt::Debug for BenchmarkRunner<S, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkRunner")
            .field("config", &self.config)
            .field("solvers", &self.solvers.len())
            .field("problems", &self.problems.len())
            .field("single_results", &self.single_results.len())
            .finish()
    }
}

/// Counts of one benchmark execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkSummary {
    /// Benchmark name.
    pub name: String,
    /// Number of solver x problem pairs.
    pub single_count: usize,
    /// Number of measured runs executed.
    pub run_count: usize,
    /// Number of measured runs that failed.
    pub failure_count: usize,
    /// Number of warm-up runs executed.
    pub warm_up_count: usize,
    /// Number of warm-up runs that failed.
    pub warm_up_failure_count: usize,
}

impl BenchmarkSummary {
    fn new(name: &str, single_count: usize) -> Self {
        Self {
            name: name.to_string(),
            single_count,
            run_count: 0,
            failure_count: 0,
            warm_up_count: 0,
            warm_up_failure_count: 0,
        }
    }

    /// Returns true if every measured run succeeded.
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }
}

impl fmt::Display for BenchmarkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} single benchmarks, {} runs ({} failed), {} warm-ups ({} failed)",
            self.name,
            self.single_count,
            self.run_count,
            self.failure_count,
            self.warm_up_count,
            self.warm_up_failure_count
        )
    }
}
