//! Tests for the event system.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use solverbench_core::SimpleScore;

#[derive(Clone, Debug)]
struct TestSolution {
    score: Option<SimpleScore>,
}

impl PlanningSolution for TestSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

#[derive(Debug, Default)]
struct CountingEventListener {
    started: AtomicUsize,
    best: AtomicUsize,
    steps: AtomicUsize,
    ended: AtomicUsize,
}

impl SolverEventListener<TestSolution> for CountingEventListener {
    fn on_solving_started(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_best_solution_changed(&self, _event: &BestSolutionChangedEvent<SimpleScore>) {
        self.best.fetch_add(1, Ordering::SeqCst);
    }

    fn on_step_ended(&self, _event: &StepEndedEvent<SimpleScore>) {
        self.steps.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _time_millis_spent: u64) {
        self.ended.fetch_add(1, Ordering::SeqCst);
    }
}

fn step(step_index: u64) -> StepEndedEvent<SimpleScore> {
    StepEndedEvent {
        step_index,
        time_millis_spent: step_index,
        score: SimpleScore::of(-1),
        score_calculation_count: step_index * 4,
        selected_move_count: 4,
        accepted_move_count: 1,
    }
}

#[test]
fn test_event_support_new() {
    let support: SolverEventSupport<TestSolution> = SolverEventSupport::new();
    assert_eq!(support.listener_count(), 0);
}

#[test]
fn test_fire_events_reaches_every_listener() {
    let mut support: SolverEventSupport<TestSolution> = SolverEventSupport::new();
    let first = Arc::new(CountingEventListener::default());
    let second = Arc::new(CountingEventListener::default());
    support.add_listener(first.clone());
    support.add_listener(second.clone());

    support.fire_solving_started();
    support.fire_best_solution_changed(&BestSolutionChangedEvent {
        time_millis_spent: 3,
        score: SimpleScore::of(-2),
    });
    support.fire_step_ended(&step(0));
    support.fire_step_ended(&step(1));
    support.fire_solving_ended(10);

    for listener in [&first, &second] {
        assert_eq!(listener.started.load(Ordering::SeqCst), 1);
        assert_eq!(listener.best.load(Ordering::SeqCst), 1);
        assert_eq!(listener.steps.load(Ordering::SeqCst), 2);
        assert_eq!(listener.ended.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_remove_listener_only_detaches_that_listener() {
    let mut support: SolverEventSupport<TestSolution> = SolverEventSupport::new();
    let kept = Arc::new(CountingEventListener::default());
    let removed = Arc::new(CountingEventListener::default());
    let kept_id = support.add_listener(kept.clone());
    let removed_id = support.add_listener(removed.clone());

    assert!(support.remove_listener(removed_id));
    assert!(!support.remove_listener(removed_id));
    assert!(support.contains(kept_id));
    assert!(!support.contains(removed_id));

    support.fire_step_ended(&step(0));
    assert_eq!(kept.steps.load(Ordering::SeqCst), 1);
    assert_eq!(removed.steps.load(Ordering::SeqCst), 0);
}

#[test]
fn test_listener_ids_are_unique() {
    let mut support: SolverEventSupport<TestSolution> = SolverEventSupport::new();
    let listener = Arc::new(CountingEventListener::default());
    let a = support.add_listener(listener.clone());
    let b = support.add_listener(listener);
    assert_ne!(a, b);
    assert_eq!(support.listener_count(), 2);

    support.clear_listeners();
    assert_eq!(support.listener_count(), 0);
}
