//! Problem benchmark result and problem I/O.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use solverbench_core::{PlanningSolution, ProblemScale, Result};
use tracing::{debug, warn};

use super::{PlannerBenchmarkResult, SubSingleBenchmarkResult};

/// Source of problem instances and sink of solutions.
///
/// Implementations must tolerate concurrent calls: sibling runs of the same
/// problem share one instance.
pub trait ProblemIo<S: PlanningSolution>: Send + Sync {
    /// Materializes a fresh, unsolved problem.
    fn read_problem(&self) -> Result<S>;

    /// Persists the solution of the named run.
    fn write_solution(&self, sub_single_name: &str, solution: &S) -> Result<()>;
}

/// Problem I/O building problems with a closure and discarding solutions.
pub struct FnProblemIo<P> {
    problem_factory: P,
}

impl<P> FnProblemIo<P> {
    /// Wraps a problem factory.
    pub fn new(problem_factory: P) -> Self {
        Self { problem_factory }
    }
}

impl<P> fmt::Debug for FnProblemIo<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProblemIo").finish_non_exhaustive()
    }
}

impl<S, P> ProblemIo<S> for FnProblemIo<P>
where
    S: PlanningSolution,
    P: Fn() -> S + Send + Sync,
{
    fn read_problem(&self) -> Result<S> {
        Ok((self.problem_factory)())
    }

    fn write_solution(&self, sub_single_name: &str, _solution: &S) -> Result<()> {
        debug!(event = "solution_discarded", sub_single = sub_single_name);
        Ok(())
    }
}

/// One problem instance benchmarked by every solver.
///
/// Shared by all runs on the problem. Scale registration from sibling runs is
/// merged under a lock, keeping the field-wise maximum.
pub struct ProblemBenchmarkResult<S, P> {
    name: String,
    problem_io: P,
    planner: Arc<PlannerBenchmarkResult>,
    scale: Mutex<Option<ProblemScale>>,
    scale_registration_count: AtomicUsize,
    _solution: PhantomData<fn() -> S>,
}

impl<S, P> ProblemBenchmarkResult<S, P> {
    /// Creates a problem result.
    pub fn new(name: impl Into<String>, problem_io: P, planner: Arc<PlannerBenchmarkResult>) -> Self {
        Self {
            name: name.into(),
            problem_io,
            planner,
            scale: Mutex::new(None),
            scale_registration_count: AtomicUsize::new(0),
            _solution: PhantomData,
        }
    }

    /// Returns the problem name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the problem I/O.
    pub fn problem_io(&self) -> &P {
        &self.problem_io
    }

    /// Returns the enclosing planner result.
    pub fn planner_result(&self) -> &PlannerBenchmarkResult {
        &self.planner
    }

    /// Returns the merged scale, once any run registered one.
    pub fn scale(&self) -> Option<ProblemScale> {
        *self
            .scale
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns how many times a scale was registered.
    pub fn scale_registration_count(&self) -> usize {
        self.scale_registration_count.load(Ordering::SeqCst)
    }

    /// Records the scale observed by one run.
    pub fn register_scale(
        &self,
        entity_count: u64,
        genuine_variable_count: u64,
        maximum_value_count: u64,
        problem_scale: u64,
    ) {
        let observed = ProblemScale::new(
            entity_count,
            genuine_variable_count,
            maximum_value_count,
            problem_scale,
        );
        let mut scale = self
            .scale
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let merged = match *scale {
            None => observed,
            Some(registered) if registered == observed => registered,
            Some(registered) => {
                warn!(
                    event = "problem_scale_diverged",
                    problem = %self.name,
                    registered = ?registered,
                    observed = ?observed,
                );
                registered.merge(&observed)
            }
        };
        *scale = Some(merged);
        self.scale_registration_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl<S, P> ProblemBenchmarkResult<S, P>
where
    S: PlanningSolution,
    P: ProblemIo<S>,
{
    /// Materializes a fresh problem instance.
    pub fn read_problem(&self) -> Result<S> {
        self.problem_io.read_problem()
    }

    /// Persists the solution produced by a run.
    pub fn write_solution(&self, sub_single: &SubSingleBenchmarkResult<S>, solution: &S) -> Result<()> {
        self.problem_io.write_solution(sub_single.name(), solution)
    }
}

impl<S, P> fmt::Debug for ProblemBenchmarkResult<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemBenchmarkResult")
            .field("name", &self.name)
            .field("planner", &self.planner.name())
            .finish_non_exhaustive()
    }
}
