//! N-Queens problem test fixtures.
//!
//! Places N queens on an NxN chessboard such that no two queens threaten each
//! other. Each queen owns a fixed column; its row is the planning variable.
//!
//! # Example
//!
//! ```
//! use solverbench_test::nqueens::{calculate_conflicts, NQueensSolution};
//! use solverbench_core::SimpleScore;
//!
//! let solution = NQueensSolution::with_rows(&[0, 2, 1, 3]);
//! assert_eq!(calculate_conflicts(&solution), SimpleScore::of(-2));
//! ```

use solverbench_core::{PlanningSolution, SimpleScore, SolutionDescriptor};

/// A queen entity in the N-Queens problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queen {
    pub column: usize,
    pub row: Option<usize>,
}

/// N-Queens problem solution.
#[derive(Clone, Debug)]
pub struct NQueensSolution {
    pub n: usize,
    pub queens: Vec<Queen>,
    pub score: Option<SimpleScore>,
}

impl NQueensSolution {
    /// Creates an N-Queens problem with n unassigned queens.
    pub fn uninitialized(n: usize) -> Self {
        Self {
            n,
            queens: (0..n).map(|column| Queen { column, row: None }).collect(),
            score: None,
        }
    }

    /// Creates an N-Queens solution with queens at the specified rows.
    pub fn with_rows(rows: &[usize]) -> Self {
        Self {
            n: rows.len(),
            queens: rows
                .iter()
                .enumerate()
                .map(|(column, &row)| Queen {
                    column,
                    row: Some(row),
                })
                .collect(),
            score: None,
        }
    }

    /// Returns the assigned rows, column by column.
    pub fn rows(&self) -> Vec<Option<usize>> {
        self.queens.iter().map(|queen| queen.row).collect()
    }
}

impl PlanningSolution for NQueensSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.queens.iter().all(|queen| queen.row.is_some())
    }
}

/// Conflict counts per constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConflictCounts {
    pub row: u64,
    pub ascending_diagonal: u64,
    pub descending_diagonal: u64,
}

impl ConflictCounts {
    pub fn total(&self) -> u64 {
        self.row + self.ascending_diagonal + self.descending_diagonal
    }
}

/// Counts the conflicts between every pair of assigned queens.
pub fn count_conflicts(solution: &NQueensSolution) -> ConflictCounts {
    let mut counts = ConflictCounts::default();
    let queens = &solution.queens;
    for i in 0..queens.len() {
        for j in (i + 1)..queens.len() {
            let (Some(row_i), Some(row_j)) = (queens[i].row, queens[j].row) else {
                continue;
            };
            let (column_i, column_j) = (queens[i].column as i64, queens[j].column as i64);
            let (row_i, row_j) = (row_i as i64, row_j as i64);
            if row_i == row_j {
                counts.row += 1;
            }
            if row_i - column_i == row_j - column_j {
                counts.ascending_diagonal += 1;
            }
            if row_i + column_i == row_j + column_j {
                counts.descending_diagonal += 1;
            }
        }
    }
    counts
}

/// Returns the negated number of conflicts; 0 is optimal.
pub fn calculate_conflicts(solution: &NQueensSolution) -> SimpleScore {
    SimpleScore::of(-(count_conflicts(solution).total() as i64))
}

/// Describes the N-Queens solution to the benchmark harness.
///
/// Every queen is one entity with one genuine variable whose value range is
/// the n rows of the board.
#[derive(Clone, Copy, Debug, Default)]
pub struct NQueensDescriptor;

impl SolutionDescriptor<NQueensSolution> for NQueensDescriptor {
    fn entity_count(&self, solution: &NQueensSolution) -> u64 {
        solution.queens.len() as u64
    }

    fn genuine_variable_count(&self, solution: &NQueensSolution) -> u64 {
        solution.queens.len() as u64
    }

    fn maximum_value_count(&self, solution: &NQueensSolution) -> u64 {
        solution.n as u64
    }

    fn problem_scale(&self, solution: &NQueensSolution) -> u64 {
        solution.queens.len() as u64 * solution.n as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solverbench_core::ProblemScale;

    #[test]
    fn test_uninitialized() {
        let solution = NQueensSolution::uninitialized(4);
        assert_eq!(solution.rows(), vec![None; 4]);
        assert!(!solution.is_initialized());
        assert_eq!(calculate_conflicts(&solution), SimpleScore::of(0));
    }

    #[test]
    fn test_optimal_four_queens() {
        let solution = NQueensSolution::with_rows(&[1, 3, 0, 2]);
        assert!(solution.is_initialized());
        assert_eq!(count_conflicts(&solution).total(), 0);
    }

    #[test]
    fn test_conflict_kinds() {
        let counts = count_conflicts(&NQueensSolution::with_rows(&[0, 1, 0]));
        assert_eq!(
            counts,
            ConflictCounts {
                row: 1,
                ascending_diagonal: 1,
                descending_diagonal: 1,
            }
        );
    }

    #[test]
    fn test_descriptor_scale() {
        let solution = NQueensSolution::uninitialized(8);
        assert_eq!(
            NQueensDescriptor.scale_of(&solution),
            ProblemScale::new(8, 8, 8, 64)
        );
    }
}
