//! Error types for SolverBench

use thiserror::Error;

/// Main error type for benchmark operations.
///
/// Every failure a run task can observe maps onto one of these variants. The
/// dispatcher stores the error on the sub-single result that failed.
#[derive(Debug, Error)]
pub enum SolverBenchError {
    /// Error in solver or benchmark configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a problem or writing a solution failed
    #[error("Problem I/O error: {0}")]
    ProblemIo(String),

    /// The solver factory could not build a solver
    #[error("Solver construction error: {0}")]
    SolverConstruction(String),

    /// The solver failed while solving
    #[error("Solve error: {0}")]
    Solve(String),

    /// A statistic collector failed to attach, detach or hibernate
    #[error("Statistic error: {0}")]
    Statistic(String),

    /// The score manager could not explain a solution
    #[error("Score explanation error: {0}")]
    ScoreExplanation(String),

    /// Invalid operation for the current benchmark state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<std::io::Error> for SolverBenchError {
    fn from(err: std::io::Error) -> Self {
        SolverBenchError::ProblemIo(err.to_string())
    }
}

/// Result type alias for benchmark operations
pub type Result<T> = std::result::Result<T, SolverBenchError>;
