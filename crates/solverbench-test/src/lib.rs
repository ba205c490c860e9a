//! Shared test fixtures for SolverBench crates.
//!
//! - [`nqueens`] - N-Queens problem data types, conflict calculation and descriptor
//! - [`solver`] - Seeded hill-climbing solver with failure injection
//! - [`io`] - Recording problem I/O and a fixed memory probe
//! - [`statistic`] - Statistic logging its lifecycle calls
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! solverbench-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use solverbench_test::{HillClimbingFactory, NQueensSolution, RecordingProblemIo};
//! ```

pub mod io;
pub mod nqueens;
pub mod solver;
pub mod statistic;

pub use io::{FixedMemoryProbe, RecordingProblemIo};
pub use nqueens::{NQueensDescriptor, NQueensSolution, Queen};
pub use solver::{ConflictScoreManager, HillClimbingFactory, HillClimbingSolver};
pub use statistic::{RecordingStatistic, StatisticLog, StatisticOp};
