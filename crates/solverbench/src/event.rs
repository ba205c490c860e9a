//! Event system for observing a solver during a benchmark run.
//!
//! Solvers own a [`SolverEventSupport`] and fire events into it while solving.
//! Statistic collectors attach listeners before the solve and detach them
//! afterwards, using the [`ListenerId`] handed out at registration.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use solverbench::event::{BestSolutionChangedEvent, SolverEventListener, SolverEventSupport};
//! use solverbench_core::{PlanningSolution, SimpleScore};
//!
//! #[derive(Clone, Debug)]
//! struct MySolution { score: Option<SimpleScore> }
//! impl PlanningSolution for MySolution {
//!     type Score = SimpleScore;
//!     fn score(&self) -> Option<Self::Score> { self.score }
//!     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
//! }
//!
//! #[derive(Debug)]
//! struct MyListener;
//! impl SolverEventListener<MySolution> for MyListener {
//!     fn on_best_solution_changed(&self, event: &BestSolutionChangedEvent<SimpleScore>) {
//!         println!("New best: {}", event.score);
//!     }
//! }
//!
//! let mut support = SolverEventSupport::<MySolution>::new();
//! let id = support.add_listener(Arc::new(MyListener));
//! assert!(support.remove_listener(id));
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use solverbench_core::PlanningSolution;

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Fired when the solver finds a new best solution.
#[derive(Debug, Clone)]
pub struct BestSolutionChangedEvent<Sc> {
    /// Milliseconds since solving started.
    pub time_millis_spent: u64,
    /// Score of the new best solution.
    pub score: Sc,
}

/// Fired at the end of every solver step.
#[derive(Debug, Clone)]
pub struct StepEndedEvent<Sc> {
    /// Index of the step, counted over the whole solve.
    pub step_index: u64,
    /// Milliseconds since solving started.
    pub time_millis_spent: u64,
    /// Score of the working solution after the step.
    pub score: Sc,
    /// Total score calculations so far.
    pub score_calculation_count: u64,
    /// Moves evaluated during this step.
    pub selected_move_count: u64,
    /// Moves accepted during this step.
    pub accepted_move_count: u64,
}

/// Listener for solver events.
///
/// Every method has an empty default so listeners only implement the events
/// they sample.
pub trait SolverEventListener<S: PlanningSolution>: Send + Sync + Debug {
    /// Called when solving starts.
    fn on_solving_started(&self) {}

    /// Called when a new best solution is found.
    fn on_best_solution_changed(&self, _event: &BestSolutionChangedEvent<S::Score>) {}

    /// Called when a step ends.
    fn on_step_ended(&self, _event: &StepEndedEvent<S::Score>) {}

    /// Called when solving ends.
    fn on_solving_ended(&self, _time_millis_spent: u64) {}
}

/// Central event broadcaster for solver events.
///
/// All listener methods are called synchronously in registration order.
pub struct SolverEventSupport<S: PlanningSolution> {
    listeners: Vec<(ListenerId, Arc<dyn SolverEventListener<S>>)>,
    next_id: u64,
}

impl<S: PlanningSolution> SolverEventSupport<S> {
    /// Creates a new event support instance.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Adds a listener and returns the handle needed to remove it.
    pub fn add_listener(&mut self, listener: Arc<dyn SolverEventListener<S>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Removes all listeners.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Fires the solving started event.
    pub fn fire_solving_started(&self) {
        for (_, listener) in &self.listeners {
            listener.on_solving_started();
        }
    }

    /// Fires the best solution changed event.
    pub fn fire_best_solution_changed(&self, event: &BestSolutionChangedEvent<S::Score>) {
        for (_, listener) in &self.listeners {
            listener.on_best_solution_changed(event);
        }
    }

    /// Fires the step ended event.
    pub fn fire_step_ended(&self, event: &StepEndedEvent<S::Score>) {
        for (_, listener) in &self.listeners {
            listener.on_step_ended(event);
        }
    }

    /// Fires the solving ended event.
    pub fn fire_solving_ended(&self, time_millis_spent: u64) {
        for (_, listener) in &self.listeners {
            listener.on_solving_ended(time_millis_spent);
        }
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if the listener is still registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(listener_id, _)| *listener_id == id)
    }
}

impl<S: PlanningSolution> Default for SolverEventSupport<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for SolverEventSupport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
