//! Domain model traits seen by the benchmark harness
//!
//! - `PlanningSolution`: the container for the complete problem and solution
//! - `SolutionDescriptor`: runtime metadata that measures a solution's scale
//! - `ProblemScale`: the scale tuple registered once per measured run

mod descriptor;
mod scale;
mod traits;

pub use descriptor::SolutionDescriptor;
pub use scale::ProblemScale;
pub use traits::PlanningSolution;
