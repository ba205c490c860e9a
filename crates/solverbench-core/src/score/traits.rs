//! Core Score trait definition

use std::fmt::{Debug, Display};

use super::ScoreLevel;

/// Core trait for all score types.
///
/// All score implementations must be:
/// - Immutable (operations return new instances)
/// - Thread-safe (Send + Sync)
/// - Comparable (total ordering, higher is better)
///
/// When comparing multi-level scores, higher-priority levels are compared first.
pub trait Score:
    Copy + Debug + Display + Default + Send + Sync + PartialEq + Eq + PartialOrd + Ord + 'static
{
    /// Returns true if all hard constraints are satisfied.
    fn is_feasible(&self) -> bool;

    /// Returns the zero score.
    fn zero() -> Self;

    /// Returns the number of score levels.
    fn levels_count() -> usize;

    /// Returns the score values, highest priority first.
    ///
    /// For HardSoftScore: [hard, soft]
    fn to_level_numbers(&self) -> Vec<i64>;

    /// Returns the semantic label for the level at the given index.
    ///
    /// # Panics
    /// Panics if `index >= levels_count()`.
    fn level_label(index: usize) -> ScoreLevel;

    /// Returns true if this score is better than the other score.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }
}
