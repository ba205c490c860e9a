//! Seeded hill-climbing solver for N-Queens.
//!
//! Small enough to run in milliseconds, yet exercises everything the harness
//! observes: solver events, score calculation counts, constraint match
//! tracking and seeding. Failures can be injected at construction, at a given
//! step and in the score explanation.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use solverbench::event::{BestSolutionChangedEvent, SolverEventSupport, StepEndedEvent};
use solverbench::solver::{ScoreDirector, ScoreManager, Solver, SolverEvents, SolverFactory, SolverScope};
use solverbench_config::SolverConfig;
use solverbench_core::{PlanningSolution, Result, SimpleScore, SolverBenchError};
use tracing::debug;

use crate::nqueens::{calculate_conflicts, count_conflicts, NQueensDescriptor, NQueensSolution};

/// Step limit applied when the configuration sets none.
pub const DEFAULT_STEP_LIMIT: u64 = 50;

/// Moves evaluated per step unless configured otherwise.
pub const DEFAULT_MOVES_PER_STEP: usize = 8;

/// Score director of the hill-climbing solver.
#[derive(Debug, Clone, Copy)]
pub struct ConflictScoreDirector {
    constraint_match_enabled: bool,
}

impl ScoreDirector for ConflictScoreDirector {
    fn is_constraint_match_enabled(&self) -> bool {
        self.constraint_match_enabled
    }
}

/// End-of-solve observables of the hill-climbing solver.
#[derive(Debug)]
pub struct HillClimbingScope {
    descriptor: NQueensDescriptor,
    director: ConflictScoreDirector,
    score_calculation_count: u64,
}

impl SolverScope<NQueensSolution> for HillClimbingScope {
    type Descriptor = NQueensDescriptor;
    type Director = ConflictScoreDirector;

    fn solution_descriptor(&self) -> &NQueensDescriptor {
        &self.descriptor
    }

    fn score_calculation_count(&self) -> u64 {
        self.score_calculation_count
    }

    fn score_director(&self) -> &ConflictScoreDirector {
        &self.director
    }
}

/// Hill climbing over single-queen row changes.
///
/// Unassigned queens are first placed on random rows. Each step then samples
/// `moves_per_step` random row changes and applies the best one unless it
/// worsens the score.
#[derive(Debug)]
pub struct HillClimbingSolver {
    events: SolverEventSupport<NQueensSolution>,
    scope: HillClimbingScope,
    rng: ChaCha8Rng,
    random_seed: Option<u64>,
    step_limit: u64,
    time_limit: Option<Duration>,
    moves_per_step: usize,
    fail_at_step: Option<u64>,
    time_millis_spent: u64,
}

impl HillClimbingSolver {
    /// Returns the seed the random generator started from.
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    fn calculate(&mut self, solution: &NQueensSolution) -> SimpleScore {
        self.scope.score_calculation_count += 1;
        calculate_conflicts(solution)
    }
}

impl SolverEvents<NQueensSolution> for HillClimbingSolver {
    fn event_support(&mut self) -> &mut SolverEventSupport<NQueensSolution> {
        &mut self.events
    }
}

impl Solver<NQueensSolution> for HillClimbingSolver {
    type Scope = HillClimbingScope;

    fn solve(&mut self, mut working: NQueensSolution) -> Result<NQueensSolution> {
        let started = Instant::now();
        let elapsed_millis = |started: &Instant| started.elapsed().as_millis() as u64;
        self.scope.score_calculation_count = 0;
        self.events.fire_solving_started();
        debug!(event = "solve_start", n = working.n, seed = ?self.random_seed);

        let n = working.n;
        for queen in &mut working.queens {
            if queen.row.is_none() && n > 0 {
                queen.row = Some(self.rng.random_range(0..n));
            }
        }
        let mut score = self.calculate(&working);
        working.set_score(Some(score));
        let mut best = working.clone();
        self.events
            .fire_best_solution_changed(&BestSolutionChangedEvent {
                time_millis_spent: elapsed_millis(&started),
                score,
            });

        let queen_count = working.queens.len();
        for step_index in 0..self.step_limit {
            if score.score() == 0 || queen_count == 0 || n == 0 {
                break;
            }
            if self.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                break;
            }
            if self.fail_at_step == Some(step_index) {
                return Err(SolverBenchError::Solve(format!(
                    "injected failure at step {}",
                    step_index
                )));
            }

            let mut selected: Option<(usize, usize, SimpleScore)> = None;
            for _ in 0..self.moves_per_step {
                let queen = self.rng.random_range(0..queen_count);
                let row = self.rng.random_range(0..n);
                let previous = working.queens[queen].row.replace(row);
                let move_score = self.calculate(&working);
                working.queens[queen].row = previous;
                if selected.map_or(true, |(_, _, best_move)| move_score > best_move) {
                    selected = Some((queen, row, move_score));
                }
            }

            let mut accepted_move_count = 0;
            if let Some((queen, row, move_score)) = selected {
                if move_score >= score {
                    working.queens[queen].row = Some(row);
                    working.set_score(Some(move_score));
                    score = move_score;
                    accepted_move_count = 1;
                }
            }

            let time_millis_spent = elapsed_millis(&started);
            self.events.fire_step_ended(&StepEndedEvent {
                step_index,
                time_millis_spent,
                score,
                score_calculation_count: self.scope.score_calculation_count,
                selected_move_count: self.moves_per_step as u64,
                accepted_move_count,
            });
            if best.score().map_or(true, |best_score| score > best_score) {
                best = working.clone();
                self.events
                    .fire_best_solution_changed(&BestSolutionChangedEvent {
                        time_millis_spent,
                        score,
                    });
            }
        }

        self.time_millis_spent = elapsed_millis(&started);
        self.events.fire_solving_ended(self.time_millis_spent);
        debug!(event = "solve_end", score = %score, time_millis_spent = self.time_millis_spent);
        Ok(best)
    }

    fn time_millis_spent(&self) -> u64 {
        self.time_millis_spent
    }

    fn solver_scope(&self) -> &HillClimbingScope {
        &self.scope
    }
}

/// Explains N-Queens scores constraint by constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictScoreManager {
    fail: bool,
}

impl ScoreManager<NQueensSolution> for ConflictScoreManager {
    fn summary(&self, solution: &NQueensSolution) -> Result<String> {
        if self.fail {
            return Err(SolverBenchError::ScoreExplanation(
                "injected explanation failure".to_string(),
            ));
        }
        let counts = count_conflicts(solution);
        let score = calculate_conflicts(solution);
        Ok(format!(
            "Explanation of score ({}):\n    Constraint matches:\n        {}: constraint (Row conflict) has {} matches\n        {}: constraint (Ascending diagonal conflict) has {} matches\n        {}: constraint (Descending diagonal conflict) has {} matches\n",
            score,
            -(counts.row as i64),
            counts.row,
            -(counts.ascending_diagonal as i64),
            counts.ascending_diagonal,
            -(counts.descending_diagonal as i64),
            counts.descending_diagonal,
        ))
    }
}

/// Factory building [`HillClimbingSolver`]s and remembering every
/// configuration it was handed.
#[derive(Debug, Default)]
pub struct HillClimbingFactory {
    moves_per_step: Option<usize>,
    fail_build: bool,
    fail_at_step: Option<u64>,
    fail_summary: bool,
    built_configs: Mutex<Vec<SolverConfig>>,
}

impl HillClimbingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_moves_per_step(mut self, moves_per_step: usize) -> Self {
        self.moves_per_step = Some(moves_per_step);
        self
    }

    /// Makes every `build_solver` call fail.
    pub fn with_failing_build(mut self) -> Self {
        self.fail_build = true;
        self
    }

    /// Makes every solve fail when it reaches `step_index`.
    pub fn with_failure_at_step(mut self, step_index: u64) -> Self {
        self.fail_at_step = Some(step_index);
        self
    }

    /// Makes the score manager fail to explain scores.
    pub fn with_failing_summary(mut self) -> Self {
        self.fail_summary = true;
        self
    }

    /// Returns copies of the configurations solvers were built from.
    pub fn built_configs(&self) -> Vec<SolverConfig> {
        self.built_configs
            .lock()
            .map(|configs| configs.clone())
            .unwrap_or_default()
    }

    /// Returns the seed of every built solver, in build order.
    pub fn built_seeds(&self) -> Vec<Option<u64>> {
        self.built_configs()
            .iter()
            .map(|config| config.random_seed)
            .collect()
    }

    pub fn build_count(&self) -> usize {
        self.built_configs().len()
    }
}

impl SolverFactory<NQueensSolution> for HillClimbingFactory {
    type Solver = HillClimbingSolver;
    type ScoreManager = ConflictScoreManager;

    fn build_solver(&self, config: SolverConfig) -> Result<HillClimbingSolver> {
        if let Ok(mut built) = self.built_configs.lock() {
            built.push(config.clone());
        }
        if self.fail_build {
            return Err(SolverBenchError::SolverConstruction(
                "injected construction failure".to_string(),
            ));
        }
        let rng = match config.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        Ok(HillClimbingSolver {
            events: SolverEventSupport::new(),
            scope: HillClimbingScope {
                descriptor: NQueensDescriptor,
                director: ConflictScoreDirector {
                    constraint_match_enabled: config.constraint_match_enabled(),
                },
                score_calculation_count: 0,
            },
            rng,
            random_seed: config.random_seed,
            step_limit: config.step_count_limit().unwrap_or(DEFAULT_STEP_LIMIT),
            time_limit: config.time_limit(),
            moves_per_step: self.moves_per_step.unwrap_or(DEFAULT_MOVES_PER_STEP),
            fail_at_step: self.fail_at_step,
            time_millis_spent: 0,
        })
    }

    fn score_manager(&self) -> ConflictScoreManager {
        ConflictScoreManager {
            fail: self.fail_summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(seed: u64, n: usize) -> (NQueensSolution, u64) {
        let factory = HillClimbingFactory::new();
        let mut solver = factory
            .build_solver(SolverConfig::new().with_random_seed(seed))
            .unwrap();
        let solution = solver.solve(NQueensSolution::uninitialized(n)).unwrap();
        (solution, solver.solver_scope().score_calculation_count())
    }

    #[test]
    fn test_same_seed_same_run() {
        let (first, first_count) = solve(7, 8);
        let (second, second_count) = solve(7, 8);
        assert_eq!(first.rows(), second.rows());
        assert_eq!(first.score, second.score);
        assert_eq!(first_count, second_count);
    }

    #[test]
    fn test_solution_is_initialized_and_scored() {
        let (solution, count) = solve(3, 6);
        assert!(solution.is_initialized());
        assert_eq!(solution.score, Some(calculate_conflicts(&solution)));
        assert!(count >= 1);
    }

    #[test]
    fn test_failure_at_step() {
        let factory = HillClimbingFactory::new().with_failure_at_step(0);
        let mut solver = factory
            .build_solver(SolverConfig::new().with_random_seed(1))
            .unwrap();
        // A 2x2 board always has a conflict, so step 0 is reached.
        let err = solver.solve(NQueensSolution::uninitialized(2)).unwrap_err();
        assert!(matches!(err, SolverBenchError::Solve(_)));
    }

    #[test]
    fn test_failing_build_still_records_config() {
        let factory = HillClimbingFactory::new().with_failing_build();
        assert!(factory
            .build_solver(SolverConfig::new().with_random_seed(5))
            .is_err());
        assert_eq!(factory.built_seeds(), vec![Some(5)]);
    }

    #[test]
    fn test_summary_lists_constraints() {
        let summary = ConflictScoreManager::default()
            .summary(&NQueensSolution::with_rows(&[0, 1, 0]))
            .unwrap();
        assert!(summary.starts_with("Explanation of score (-3):"));
        assert!(summary.contains("constraint (Row conflict) has 1 matches"));
    }
}
