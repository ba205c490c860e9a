//! Solver contract consumed by the benchmark harness.
//!
//! The harness treats the solver as a black box. A [`SolverFactory`] builds one
//! fresh [`Solver`] per run from a configuration it takes ownership of; after
//! solving, the solver's [`SolverScope`] exposes the observables the run task
//! records.
//!
//! All solver-side types are associated types, so a benchmark over a concrete
//! solver is fully monomorphized. Only statistic collectors see the solver
//! through the object-safe [`SolverEvents`] view.

use solverbench_config::SolverConfig;
use solverbench_core::{PlanningSolution, Result, SolutionDescriptor};

use crate::event::SolverEventSupport;

/// Object-safe view of a solver that statistics attach listeners to.
pub trait SolverEvents<S: PlanningSolution> {
    /// Returns the solver's event broadcaster.
    fn event_support(&mut self) -> &mut SolverEventSupport<S>;
}

/// Score calculation component of a solver.
pub trait ScoreDirector {
    /// Returns true if individual constraint matches are tracked.
    ///
    /// Score explanation needs constraint matches; easy calculators that only
    /// produce a total score return false.
    fn is_constraint_match_enabled(&self) -> bool;
}

/// End-of-solve observables of a solver.
pub trait SolverScope<S: PlanningSolution> {
    /// Descriptor of the solution type.
    type Descriptor: SolutionDescriptor<S>;

    /// Score director used while solving.
    type Director: ScoreDirector;

    /// Returns the solution descriptor.
    fn solution_descriptor(&self) -> &Self::Descriptor;

    /// Returns the number of score calculations performed.
    fn score_calculation_count(&self) -> u64;

    /// Returns the score director.
    fn score_director(&self) -> &Self::Director;
}

/// A solver that runs synchronously on the calling thread.
pub trait Solver<S: PlanningSolution>: SolverEvents<S> {
    /// Scope type exposing end-of-solve observables.
    type Scope: SolverScope<S>;

    /// Solves the problem and returns the best solution found.
    fn solve(&mut self, problem: S) -> Result<S>;

    /// Returns the wall clock time the last solve took.
    fn time_millis_spent(&self) -> u64;

    /// Returns the solver scope.
    fn solver_scope(&self) -> &Self::Scope;
}

/// Explains the score of a solution.
pub trait ScoreManager<S: PlanningSolution> {
    /// Returns a human readable summary of the constraint matches.
    fn summary(&self, solution: &S) -> Result<String>;
}

/// Builds solvers from configuration.
///
/// `build_solver` takes the configuration by value: the factory must move it
/// into the solver (or drop it) and keep no reference once the call returns.
pub trait SolverFactory<S: PlanningSolution>: Send + Sync {
    /// Solver type produced by this factory.
    type Solver: Solver<S>;

    /// Score manager type produced by this factory.
    type ScoreManager: ScoreManager<S>;

    /// Builds a fresh solver.
    fn build_solver(&self, config: SolverConfig) -> Result<Self::Solver>;

    /// Creates a score manager matching the solvers this factory builds.
    fn score_manager(&self) -> Self::ScoreManager;
}
