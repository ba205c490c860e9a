//! Result records populated by benchmark runs.
//!
//! The records nest as planner -> problem / solver -> single -> sub-single.
//! Problem and solver records are shared (`Arc`) between every single
//! benchmark that uses them; a sub-single record belongs to exactly one run.

mod planner;
mod problem;
mod single;
mod solver;
mod sub_single;

pub use planner::PlannerBenchmarkResult;
pub use problem::{FnProblemIo, ProblemBenchmarkResult, ProblemIo};
pub use single::{SingleBenchmarkContext, SingleBenchmarkResult};
pub use solver::SolverBenchmarkResult;
pub use sub_single::SubSingleBenchmarkResult;
