//! Solution descriptor.

use super::{PlanningSolution, ProblemScale};

/// Describes a planning solution at runtime.
///
/// The solver owns a descriptor for its solution type and exposes it through
/// its scope. The benchmark harness uses it after solving to measure the scale
/// of the problem and to read the final score.
pub trait SolutionDescriptor<S: PlanningSolution>: Send + Sync {
    /// Returns the number of planning entities across all entity collections.
    fn entity_count(&self, solution: &S) -> u64;

    /// Returns the number of genuine (non-shadow) planning variables.
    fn genuine_variable_count(&self, solution: &S) -> u64;

    /// Returns the largest value range size over all genuine variables.
    fn maximum_value_count(&self, solution: &S) -> u64;

    /// Returns the sum over all entities of the product of their value range sizes.
    fn problem_scale(&self, solution: &S) -> u64;

    /// Returns the score stored on the solution.
    fn score_of(&self, solution: &S) -> Option<S::Score> {
        solution.score()
    }

    /// Measures all scale observables at once.
    fn scale_of(&self, solution: &S) -> ProblemScale {
        ProblemScale {
            entity_count: self.entity_count(solution),
            genuine_variable_count: self.genuine_variable_count(solution),
            maximum_value_count: self.maximum_value_count(solution),
            problem_scale: self.problem_scale(solution),
        }
    }
}
