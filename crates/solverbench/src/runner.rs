//! The run task: one execution of a solver on a problem.

use std::borrow::Cow;

use solverbench_config::SolverConfig;
use solverbench_core::{PlanningSolution, Result, SolutionDescriptor, SolverBenchError};
use tracing::{debug, info, info_span, warn};

use crate::diagnostic::{self, SUB_SINGLE_BENCHMARK_NAME_KEY};
use crate::result::{ProblemIo, SingleBenchmarkContext, SubSingleBenchmarkResult};
use crate::solver::{ScoreDirector, ScoreManager, Solver, SolverEvents, SolverFactory, SolverScope};
use crate::statistic::EffectiveStatisticMap;

/// Executes one run and records its observables.
///
/// A measured run writes score, time, score calculation count and (when the
/// score director tracks constraint matches) a score explanation into its
/// sub-single result, registers the problem scale and writes the solution.
/// A warm-up run only exercises the solver and its statistics.
///
/// # Type Parameters
///
/// * `S` - The planning solution type
/// * `F` - Solver factory
/// * `P` - Problem I/O
pub struct SubSingleBenchmarkRunner<'a, S: PlanningSolution, F, P> {
    context: &'a SingleBenchmarkContext<S, F, P>,
    sub_single_result: &'a mut SubSingleBenchmarkResult<S>,
    warm_up: bool,
    random_seed: Option<u64>,
}

/// Measurements of a measured run, committed together.
struct Measurements<Sc> {
    score: Option<Sc>,
    time_millis_spent: u64,
    score_calculation_count: u64,
    score_explanation_summary: Option<String>,
}

impl<'a, S: PlanningSolution, F, P> SubSingleBenchmarkRunner<'a, S, F, P> {
    /// Creates a run task writing into `sub_single_result`.
    pub fn new(
        context: &'a SingleBenchmarkContext<S, F, P>,
        sub_single_result: &'a mut SubSingleBenchmarkResult<S>,
        warm_up: bool,
    ) -> Self {
        Self {
            context,
            sub_single_result,
            warm_up,
            random_seed: None,
        }
    }

    /// Returns the name of the sub-single result this task writes.
    pub fn name(&self) -> &str {
        self.sub_single_result.name()
    }

    pub fn is_warm_up(&self) -> bool {
        self.warm_up
    }

    /// Returns the seed the solver was built with, once the task ran.
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    pub fn sub_single_result(&self) -> &SubSingleBenchmarkResult<S> {
        self.sub_single_result
    }

    /// Returns the error recorded on the sub-single result.
    pub fn failure(&self) -> Option<&SolverBenchError> {
        self.sub_single_result.failure()
    }

    /// Records the error that ended the task.
    pub fn set_failure(&mut self, failure: SolverBenchError) {
        self.sub_single_result.set_failure(failure);
    }
}

impl<'a, S, F, P> SubSingleBenchmarkRunner<'a, S, F, P>
where
    S: PlanningSolution,
    F: SolverFactory<S>,
    P: ProblemIo<S>,
{
    /// Runs the task.
    ///
    /// The name of the sub-single result is bound in the diagnostic context
    /// for the whole call and released on every exit path. On error every
    /// statistic sample of the run is discarded; the caller is expected to
    /// store the error with [`set_failure`](Self::set_failure).
    pub fn call(&mut self) -> Result<&mut Self> {
        let name = self.sub_single_result.name().to_string();
        let _diagnostic = diagnostic::put(SUB_SINGLE_BENCHMARK_NAME_KEY, name.as_str());
        let span = info_span!("sub_single_benchmark", name = %name);
        let _entered = span.enter();

        info!(
            event = "run_start",
            index = self.sub_single_result.index(),
            warm_up = self.warm_up,
        );
        if let Err(err) = self.execute() {
            discard_statistics(&mut self.sub_single_result.effective_statistic_map);
            return Err(err);
        }
        info!(
            event = "run_end",
            warm_up = self.warm_up,
            score = ?self.sub_single_result.score(),
            time_millis_spent = ?self.sub_single_result.time_millis_spent(),
        );
        Ok(self)
    }

    fn execute(&mut self) -> Result<()> {
        let context = self.context;
        let problem_result = context.problem_benchmark_result();
        let solver_benchmark = context.solver_benchmark_result();

        let problem = problem_result.read_problem()?;

        let planner = problem_result.planner_result();
        if !planner.has_multiple_parallel_benchmarks() {
            let probe = planner.memory_probe();
            probe.reclaim_hint();
            let used_memory = probe.used_memory();
            debug!(event = "memory_baseline", used_memory = ?used_memory);
            self.sub_single_result.used_memory_after_input_solution = used_memory;
        }

        let solver_config = self.derive_solver_config(solver_benchmark.solver_config());
        self.random_seed = solver_config.random_seed;
        self.sub_single_result.random_seed = solver_config.random_seed;

        let mut solver = solver_benchmark
            .solver_factory()
            .build_solver(solver_config.as_ref().clone())?;
        drop(solver_config);

        let statistics = &mut self.sub_single_result.effective_statistic_map;
        open_statistics(statistics, &mut solver)?;

        let solution = match solver.solve(problem) {
            Ok(solution) => solution,
            Err(err) => {
                warn!(event = "solve_failed", error = %err);
                close_statistics_best_effort(statistics, &mut solver);
                return Err(err);
            }
        };
        let time_millis_spent = solver.time_millis_spent();

        close_statistics(statistics, &mut solver)?;

        if self.warm_up {
            return Ok(());
        }

        let scope = solver.solver_scope();
        let descriptor = scope.solution_descriptor();
        let scale = descriptor.scale_of(&solution);
        let score_explanation_summary = if scope.score_director().is_constraint_match_enabled() {
            Some(
                solver_benchmark
                    .solver_factory()
                    .score_manager()
                    .summary(&solution)?,
            )
        } else {
            None
        };
        let measurements = Measurements {
            score: descriptor.score_of(&solution),
            time_millis_spent,
            score_calculation_count: scope.score_calculation_count(),
            score_explanation_summary,
        };

        problem_result.register_scale(
            scale.entity_count,
            scale.genuine_variable_count,
            scale.maximum_value_count,
            scale.problem_scale,
        );
        self.commit(measurements);
        problem_result.write_solution(&*self.sub_single_result, &solution)
    }

    /// Derives the configuration of this run without touching the shared one.
    ///
    /// Only a benchmark with several sub-singles derives a per-index seed.
    fn derive_solver_config<'c>(&self, solver_config: &'c SolverConfig) -> Cow<'c, SolverConfig> {
        if self.context.sub_single_count() > 1 {
            let mut derived = solver_config.clone();
            derived.offer_random_seed_from_sub_single_index(self.sub_single_result.index());
            Cow::Owned(derived)
        } else {
            Cow::Borrowed(solver_config)
        }
    }

    fn commit(&mut self, measurements: Measurements<S::Score>) {
        let result = &mut *self.sub_single_result;
        result.score = measurements.score;
        result.time_millis_spent = Some(measurements.time_millis_spent);
        result.score_calculation_count = Some(measurements.score_calculation_count);
        result.score_explanation_summary = measurements.score_explanation_summary;
    }
}

impl<S: PlanningSolution, F, P> std::fmt::Debug for SubSingleBenchmarkRunner<'_, S, F, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubSingleBenchmarkRunner")
            .field("name", &self.sub_single_result.name())
            .field("warm_up", &self.warm_up)
            .field("random_seed", &self.random_seed)
            .finish()
    }
}

fn open_statistics<S: PlanningSolution>(
    statistics: &mut EffectiveStatisticMap<S>,
    solver: &mut dyn SolverEvents<S>,
) -> Result<()> {
    let mut failure = None;
    for (statistic_type, statistic) in statistics.iter_mut() {
        if let Err(err) = statistic.open(solver) {
            failure = Some((*statistic_type, err));
            break;
        }
        if let Err(err) = statistic.init_point_list() {
            failure = Some((*statistic_type, err));
            break;
        }
    }
    let Some((statistic_type, err)) = failure else {
        return Ok(());
    };
    warn!(
        event = "statistic_open_failed",
        statistic = statistic_type.name(),
        error = %err,
    );
    close_statistics_best_effort(statistics, solver);
    Err(err)
}

fn close_statistics<S: PlanningSolution>(
    statistics: &mut EffectiveStatisticMap<S>,
    solver: &mut dyn SolverEvents<S>,
) -> Result<()> {
    let mut first_error = None;
    for (statistic_type, statistic) in statistics.iter_mut() {
        let outcome = match statistic.close(solver) {
            Ok(()) => statistic.hibernate_point_list(),
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            warn!(
                event = "statistic_close_failed",
                statistic = statistic_type.name(),
                error = %err,
            );
            first_error.get_or_insert(err);
        }
    }
    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn close_statistics_best_effort<S: PlanningSolution>(
    statistics: &mut EffectiveStatisticMap<S>,
    solver: &mut dyn SolverEvents<S>,
) {
    for (statistic_type, statistic) in statistics.iter_mut() {
        if let Err(err) = statistic.close(solver) {
            warn!(
                event = "statistic_close_failed",
                statistic = statistic_type.name(),
                error = %err,
            );
        }
    }
}

fn discard_statistics<S: PlanningSolution>(statistics: &mut EffectiveStatisticMap<S>) {
    for statistic in statistics.values_mut() {
        statistic.discard_point_list();
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
