//! Benchmark harness for constraint solvers.
//!
//! Runs configured solvers against problem instances under controlled
//! conditions and records what each run observed: final score, solving time,
//! score calculation count, problem scale, memory baseline and statistic time
//! series.
//!
//! # Overview
//!
//! - [`SubSingleBenchmarkRunner`] executes exactly one run (measured or
//!   warm-up) and writes its observables into a [`SubSingleBenchmarkResult`]
//! - [`BenchmarkRunner`] dispatches every run of a benchmark sequentially and
//!   stores run failures on the results
//! - [`statistic`] collectors attach to the solver's events while it solves
//! - [`diagnostic`] binds the running sub-single name per thread and
//!   [`logging`] prints it in front of every log line
//!
//! The solver is a black box behind the traits in [`solver`]. All of its
//! types are associated types of the [`SolverFactory`], so a benchmark over a
//! concrete solver is fully monomorphized.
//!
//! # Example
//!
//! ```
//! use solverbench_config::{BenchmarkConfig, StatisticType};
//!
//! let config = BenchmarkConfig::new("NQueens")
//!     .with_warmup_count(1)
//!     .with_sub_single_count(3)
//!     .with_statistic(StatisticType::BestScore);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Full benchmark usage with a solver factory and problem I/O:
//!
//! ```text
//! solverbench::logging::init();
//! let mut runner = BenchmarkRunner::new(config)?;
//! runner
//!     .add_solver("hill_climbing", SolverConfig::new(), factory)
//!     .add_problem("8-queens", FnProblemIo::new(|| NQueens::new(8)));
//! let summary = runner.run()?;
//! println!("{summary}");
//! ```

pub mod benchmark;
pub mod diagnostic;
pub mod event;
pub mod logging;
pub mod memory;
pub mod result;
pub mod runner;
pub mod solver;
pub mod statistic;

pub use benchmark::{BenchmarkRunner, BenchmarkSummary};
pub use event::{
    BestSolutionChangedEvent, ListenerId, SolverEventListener, SolverEventSupport, StepEndedEvent,
};
pub use memory::{MemoryProbe, NoopMemoryProbe, SystemMemoryProbe};
pub use result::{
    FnProblemIo, PlannerBenchmarkResult, ProblemBenchmarkResult, ProblemIo,
    SingleBenchmarkContext, SingleBenchmarkResult, SolverBenchmarkResult,
    SubSingleBenchmarkResult,
};
pub use runner::SubSingleBenchmarkRunner;
pub use solver::{ScoreDirector, ScoreManager, Solver, SolverEvents, SolverFactory, SolverScope};
pub use statistic::{
    HibernatedPointList, ListenerSubSingleStatistic, StatisticPoint, SubSingleStatistic,
};
