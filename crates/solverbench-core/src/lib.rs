//! SolverBench Core - shared types for benchmarking constraint solvers
//!
//! This crate provides the abstractions the benchmark harness needs from a
//! solver's domain model:
//! - Score types for representing solution quality
//! - The `PlanningSolution` trait
//! - The `SolutionDescriptor` trait exposing problem scale observables
//! - The shared error type

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{PlanningSolution, ProblemScale, SolutionDescriptor};
pub use error::{Result, SolverBenchError};
pub use score::{HardSoftScore, Score, ScoreLevel, SimpleScore};
