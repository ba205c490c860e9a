//! Score types for representing solution quality
//!
//! The harness only reads scores: it records the final score of a run and
//! samples intermediate scores into statistics. Scores therefore expose their
//! levels as plain numbers so statistics can store them without the score type.

mod hard_soft;
mod simple;
mod traits;

#[cfg(test)]
mod tests;

pub use hard_soft::HardSoftScore;
pub use simple::SimpleScore;
pub use traits::Score;

/// Score level representing different constraint priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLevel {
    /// Hard constraints - must be satisfied for feasibility
    Hard,
    /// Soft constraints - optimization objectives
    Soft,
    /// The only level of a single-level score
    Simple,
}

impl ScoreLevel {
    /// Returns the lowercase label used in statistic headers.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreLevel::Hard => "hard",
            ScoreLevel::Soft => "soft",
            ScoreLevel::Simple => "score",
        }
    }
}
