//! Tests for statistic collectors.

use super::*;
use crate::event::{BestSolutionChangedEvent, SolverEventSupport, StepEndedEvent};
use solverbench_core::{HardSoftScore, SolverBenchError};

#[derive(Clone, Debug)]
struct Plan {
    score: Option<HardSoftScore>,
}

impl PlanningSolution for Plan {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

#[derive(Default)]
struct StubSolver {
    events: SolverEventSupport<Plan>,
}

impl SolverEvents<Plan> for StubSolver {
    fn event_support(&mut self) -> &mut SolverEventSupport<Plan> {
        &mut self.events
    }
}

impl StubSolver {
    fn step(&self, step_index: u64, time_millis_spent: u64, score_calculation_count: u64) {
        self.events.fire_step_ended(&StepEndedEvent {
            step_index,
            time_millis_spent,
            score: HardSoftScore::of(0, -(step_index as i64)),
            score_calculation_count,
            selected_move_count: 10,
            accepted_move_count: 2,
        });
    }

    fn best(&self, time_millis_spent: u64, soft: i64) {
        self.events
            .fire_best_solution_changed(&BestSolutionChangedEvent {
                time_millis_spent,
                score: HardSoftScore::of(0, soft),
            });
    }
}

fn run_lifecycle(statistic: &mut dyn SubSingleStatistic<Plan>, solver: &mut StubSolver) {
    statistic.open(solver).unwrap();
    statistic.init_point_list().unwrap();
    solver.best(0, -5);
    solver.step(0, 0, 100);
    solver.step(1, 5, 200);
    solver.best(5, -3);
    statistic.close(solver).unwrap();
    statistic.hibernate_point_list().unwrap();
}

#[test]
fn test_best_score_samples_best_solution_events() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::BestScore);
    run_lifecycle(&mut statistic, &mut solver);

    let hibernated = statistic.hibernated_point_list().unwrap();
    assert_eq!(hibernated.header, "time_millis_spent,hard,soft");
    assert_eq!(hibernated.rows, vec!["0,0,-5", "5,0,-3"]);
    assert_eq!(statistic.point_count(), 2);
}

#[test]
fn test_step_score_samples_every_step() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::StepScore);
    run_lifecycle(&mut statistic, &mut solver);

    let hibernated = statistic.hibernated_point_list().unwrap();
    assert_eq!(hibernated.rows, vec!["0,0,0", "5,0,-1"]);
}

#[test]
fn test_move_count_per_step() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::MoveCountPerStep);
    run_lifecycle(&mut statistic, &mut solver);

    let hibernated = statistic.hibernated_point_list().unwrap();
    assert_eq!(
        hibernated.to_csv(),
        "time_millis_spent,accepted_move_count,selected_move_count\n0,2,10\n5,2,10\n"
    );
}

#[test]
fn test_score_calculation_speed_respects_interval() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::with_interval_millis(
        StatisticType::ScoreCalculationSpeed,
        10,
    );
    statistic.open(&mut solver).unwrap();
    statistic.init_point_list().unwrap();
    solver.step(0, 4, 40);
    solver.step(1, 10, 100);
    solver.step(2, 15, 150);
    solver.step(3, 20, 300);
    statistic.close(&mut solver).unwrap();

    assert_eq!(
        statistic.points(),
        vec![
            StatisticPoint::ScoreCalculationSpeed {
                time_millis_spent: 10,
                per_second: 10_000,
            },
            StatisticPoint::ScoreCalculationSpeed {
                time_millis_spent: 20,
                per_second: 20_000,
            },
        ]
    );
}

#[test]
fn test_events_outside_open_window_are_ignored() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::StepScore);
    statistic.init_point_list().unwrap();
    solver.step(0, 0, 1);
    statistic.open(&mut solver).unwrap();
    solver.step(1, 1, 2);
    statistic.close(&mut solver).unwrap();
    solver.step(2, 2, 3);

    assert_eq!(statistic.point_count(), 1);
    assert_eq!(solver.events.listener_count(), 0);
}

#[test]
fn test_open_and_close_are_idempotent_on_same_solver() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::BestScore);

    statistic.open(&mut solver).unwrap();
    statistic.open(&mut solver).unwrap();
    assert_eq!(solver.events.listener_count(), 1);
    assert!(statistic.is_open());

    statistic.close(&mut solver).unwrap();
    statistic.close(&mut solver).unwrap();
    assert_eq!(solver.events.listener_count(), 0);
    assert!(!statistic.is_open());
}

#[test]
fn test_open_on_second_solver_fails() {
    let mut first = StubSolver::default();
    let mut second = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::BestScore);

    statistic.open(&mut first).unwrap();
    let err = statistic.open(&mut second).unwrap_err();
    assert!(matches!(err, SolverBenchError::Statistic(_)));
    assert_eq!(second.events.listener_count(), 0);
}

#[test]
fn test_hibernate_requires_close() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::BestScore);
    statistic.open(&mut solver).unwrap();
    statistic.init_point_list().unwrap();

    assert!(statistic.hibernate_point_list().is_err());
    statistic.close(&mut solver).unwrap();
    assert!(statistic.hibernate_point_list().is_ok());
    assert!(statistic.hibernated_point_list().unwrap().is_empty());
}

#[test]
fn test_hibernate_requires_init() {
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::BestScore);
    let err = statistic.hibernate_point_list().unwrap_err();
    assert!(err.to_string().contains("never initialized"));
}

#[test]
fn test_init_point_list_drops_earlier_samples() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::StepScore);
    run_lifecycle(&mut statistic, &mut solver);
    assert!(statistic.hibernated_point_list().is_some());

    statistic.init_point_list().unwrap();
    assert!(statistic.hibernated_point_list().is_none());
    assert_eq!(statistic.point_count(), 0);
}

#[test]
fn test_discard_drops_live_and_hibernated_samples() {
    let mut solver = StubSolver::default();
    let mut statistic = ListenerSubSingleStatistic::<Plan>::new(StatisticType::StepScore);
    statistic.open(&mut solver).unwrap();
    statistic.init_point_list().unwrap();
    solver.step(0, 0, 100);
    solver.step(1, 5, 200);
    statistic.close(&mut solver).unwrap();
    assert_eq!(statistic.point_count(), 2);

    statistic.discard_point_list();
    assert_eq!(statistic.point_count(), 0);
    assert!(statistic.points().is_empty());
    assert!(statistic.hibernate_point_list().is_err());

    run_lifecycle(&mut statistic, &mut solver);
    statistic.discard_point_list();
    assert!(statistic.hibernated_point_list().is_none());
    assert_eq!(statistic.point_count(), 0);
}

#[test]
fn test_effective_map_is_ordered_by_statistic_type() {
    let map = create_effective_statistic_map::<Plan>(&[
        StatisticType::MoveCountPerStep,
        StatisticType::BestScore,
        StatisticType::StepScore,
    ]);
    let order: Vec<_> = map.keys().copied().collect();
    assert_eq!(
        order,
        vec![
            StatisticType::BestScore,
            StatisticType::StepScore,
            StatisticType::MoveCountPerStep,
        ]
    );
    for (statistic_type, statistic) in &map {
        assert_eq!(statistic.statistic_type(), *statistic_type);
    }
}

#[test]
fn test_point_time_and_row() {
    let point = StatisticPoint::Score {
        time_millis_spent: 12,
        levels: vec![-1, -20],
    };
    assert_eq!(point.time_millis_spent(), 12);
    assert_eq!(point.to_csv_row(), "12,-1,-20");
}
