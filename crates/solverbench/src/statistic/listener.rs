//! Solver listener feeding samples into a point list.

use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

use solverbench_config::StatisticType;
use solverbench_core::{PlanningSolution, Score};

use super::StatisticPoint;
use crate::event::{BestSolutionChangedEvent, SolverEventListener, StepEndedEvent};

/// Sampling state of the score calculation speed statistic.
#[derive(Debug, Clone, Copy)]
struct SpeedCursor {
    next_threshold_millis: u64,
    last_time_millis: u64,
    last_calculation_count: u64,
}

/// Listener collecting the samples of one statistic type.
///
/// Shared between the statistic and the solver's event support. Events that
/// arrive before the point list is initialized are dropped.
pub(crate) struct PointListener<S> {
    statistic_type: StatisticType,
    interval_millis: u64,
    points: Mutex<Option<Vec<StatisticPoint>>>,
    speed: Mutex<SpeedCursor>,
    _solution: PhantomData<fn() -> S>,
}

impl<S: PlanningSolution> PointListener<S> {
    pub(crate) fn new(statistic_type: StatisticType, interval_millis: u64) -> Self {
        Self {
            statistic_type,
            interval_millis,
            points: Mutex::new(None),
            speed: Mutex::new(SpeedCursor {
                next_threshold_millis: interval_millis,
                last_time_millis: 0,
                last_calculation_count: 0,
            }),
            _solution: PhantomData,
        }
    }

    /// Replaces the point list with an empty one.
    pub(crate) fn init_points(&self) {
        *lock(&self.points) = Some(Vec::new());
        *lock(&self.speed) = SpeedCursor {
            next_threshold_millis: self.interval_millis,
            last_time_millis: 0,
            last_calculation_count: 0,
        };
    }

    /// Removes the point list, leaving the listener uninitialized.
    pub(crate) fn take_points(&self) -> Option<Vec<StatisticPoint>> {
        lock(&self.points).take()
    }

    pub(crate) fn snapshot_points(&self) -> Vec<StatisticPoint> {
        lock(&self.points).clone().unwrap_or_default()
    }

    pub(crate) fn point_count(&self) -> usize {
        lock(&self.points).as_ref().map_or(0, Vec::len)
    }

    fn push(&self, point: StatisticPoint) {
        if let Some(points) = lock(&self.points).as_mut() {
            points.push(point);
        }
    }

    fn score_point(time_millis_spent: u64, score: &S::Score) -> StatisticPoint {
        StatisticPoint::Score {
            time_millis_spent,
            levels: score.to_level_numbers(),
        }
    }

    fn sample_speed(&self, event: &StepEndedEvent<S::Score>) {
        let mut cursor = lock(&self.speed);
        if event.time_millis_spent < cursor.next_threshold_millis {
            return;
        }
        let elapsed = event
            .time_millis_spent
            .saturating_sub(cursor.last_time_millis)
            .max(1);
        let calculations = event
            .score_calculation_count
            .saturating_sub(cursor.last_calculation_count);
        let per_second = calculations.saturating_mul(1000) / elapsed;

        cursor.next_threshold_millis = cursor
            .next_threshold_millis
            .saturating_add(self.interval_millis)
            .max(event.time_millis_spent);
        cursor.last_time_millis = event.time_millis_spent;
        cursor.last_calculation_count = event.score_calculation_count;
        drop(cursor);

        self.push(StatisticPoint::ScoreCalculationSpeed {
            time_millis_spent: event.time_millis_spent,
            per_second,
        });
    }
}

impl<S> std::fmt::Debug for PointListener<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointListener")
            .field("statistic_type", &self.statistic_type)
            .field("interval_millis", &self.interval_millis)
            .finish()
    }
}

impl<S: PlanningSolution> SolverEventListener<S> for PointListener<S> {
    fn on_best_solution_changed(&self, event: &BestSolutionChangedEvent<S::Score>) {
        if self.statistic_type == StatisticType::BestScore {
            self.push(Self::score_point(event.time_millis_spent, &event.score));
        }
    }

    fn on_step_ended(&self, event: &StepEndedEvent<S::Score>) {
        match self.statistic_type {
            StatisticType::BestScore => {}
            StatisticType::StepScore => {
                self.push(Self::score_point(event.time_millis_spent, &event.score));
            }
            StatisticType::ScoreCalculationSpeed => self.sample_speed(event),
            StatisticType::MoveCountPerStep => self.push(StatisticPoint::MoveCount {
                time_millis_spent: event.time_millis_spent,
                accepted: event.accepted_move_count,
                selected: event.selected_move_count,
            }),
        }
    }
}

// Samples stay readable after a listener panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
