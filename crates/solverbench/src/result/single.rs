//! Single benchmark result.

use std::fmt;
use std::sync::Arc;

use solverbench_config::StatisticType;
use solverbench_core::{PlanningSolution, Result, SolverBenchError};

use super::{ProblemBenchmarkResult, SolverBenchmarkResult, SubSingleBenchmarkResult};
use crate::runner::SubSingleBenchmarkRunner;

/// One solver benchmarked on one problem, repeated `sub_single_count` times.
pub struct SingleBenchmarkResult<S: PlanningSolution, F, P> {
    name: String,
    context: SingleBenchmarkContext<S, F, P>,
    statistic_types: Vec<StatisticType>,
    sub_single_results: Vec<SubSingleBenchmarkResult<S>>,
}

/// Shared part of a single benchmark that every run reads.
///
/// Split from [`SingleBenchmarkResult`] so a run can hold it while exclusively
/// borrowing its own sub-single result.
pub struct SingleBenchmarkContext<S, F, P> {
    solver: Arc<SolverBenchmarkResult<F>>,
    problem: Arc<ProblemBenchmarkResult<S, P>>,
    sub_single_count: usize,
}

impl<S: PlanningSolution, F, P> SingleBenchmarkResult<S, F, P> {
    /// Creates the single benchmark of `solver` on `problem`.
    ///
    /// Fails if `sub_single_count` is zero.
    pub fn new(
        solver: Arc<SolverBenchmarkResult<F>>,
        problem: Arc<ProblemBenchmarkResult<S, P>>,
        sub_single_count: usize,
        statistic_types: &[StatisticType],
    ) -> Result<Self> {
        if sub_single_count == 0 {
            return Err(SolverBenchError::Config(
                "sub_single_count must be at least 1".to_string(),
            ));
        }
        let name = format!("{}_{}", problem.name(), solver.name());
        let sub_single_results = (0..sub_single_count)
            .map(|index| SubSingleBenchmarkResult::new(&name, index, statistic_types))
            .collect();
        Ok(Self {
            name,
            context: SingleBenchmarkContext {
                solver,
                problem,
                sub_single_count,
            },
            statistic_types: statistic_types.to_vec(),
            sub_single_results,
        })
    }

    /// Returns `"{problem name}_{solver name}"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sub_single_count(&self) -> usize {
        self.context.sub_single_count
    }

    pub fn solver_benchmark_result(&self) -> &SolverBenchmarkResult<F> {
        &self.context.solver
    }

    pub fn problem_benchmark_result(&self) -> &ProblemBenchmarkResult<S, P> {
        &self.context.problem
    }

    pub fn statistic_types(&self) -> &[StatisticType] {
        &self.statistic_types
    }

    pub fn sub_single_results(&self) -> &[SubSingleBenchmarkResult<S>] {
        &self.sub_single_results
    }

    pub fn sub_single_result(&self, index: usize) -> Option<&SubSingleBenchmarkResult<S>> {
        self.sub_single_results.get(index)
    }

    pub fn sub_single_result_mut(&mut self, index: usize) -> Option<&mut SubSingleBenchmarkResult<S>> {
        self.sub_single_results.get_mut(index)
    }

    /// Returns the number of runs that ended with an error.
    pub fn failure_count(&self) -> usize {
        self.sub_single_results
            .iter()
            .filter(|result| result.has_failure())
            .count()
    }

    /// Creates a throwaway result for a warm-up run.
    ///
    /// Warm-ups take the identity of run 0 but never touch the real results.
    pub fn new_warm_up_result(&self) -> SubSingleBenchmarkResult<S> {
        SubSingleBenchmarkResult::new(&self.name, 0, &self.statistic_types)
    }

    /// Returns a measured run task for each sub-single result.
    pub fn runners(&mut self) -> impl Iterator<Item = SubSingleBenchmarkRunner<'_, S, F, P>> + '_ {
        let context = &self.context;
        self.sub_single_results
            .iter_mut()
            .map(move |sub_single| SubSingleBenchmarkRunner::new(context, sub_single, false))
    }

    /// Returns a warm-up run task writing into `scratch`.
    pub fn warm_up_runner<'a>(
        &'a self,
        scratch: &'a mut SubSingleBenchmarkResult<S>,
    ) -> SubSingleBenchmarkRunner<'a, S, F, P> {
        SubSingleBenchmarkRunner::new(&self.context, scratch, true)
    }
}

impl<S, F, P> SingleBenchmarkContext<S, F, P> {
    pub fn solver_benchmark_result(&self) -> &SolverBenchmarkResult<F> {
        &self.solver
    }

    pub fn problem_benchmark_result(&self) -> &ProblemBenchmarkResult<S, P> {
        &self.problem
    }

    pub fn sub_single_count(&self) -> usize {
        self.sub_single_count
    }
}

impl<S: PlanningSolution, F, P> fmt::Debug for SingleBenchmarkResult<S, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleBenchmarkResult")
            .field("name", &self.name)
            .field("sub_single_count", &self.context.sub_single_count)
            .field("sub_single_results", &self.sub_single_results)
            .finish_non_exhaustive()
    }
}
