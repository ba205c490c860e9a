//! Sub-single benchmark result.

use std::fmt;

use solverbench_config::StatisticType;
use solverbench_core::{PlanningSolution, SolverBenchError};

use crate::statistic::{create_effective_statistic_map, EffectiveStatisticMap, SubSingleStatistic};

/// Observables of one run of a solver on a problem.
///
/// Written by exactly one run task through an exclusive borrow; every
/// measurement stays `None` until that run records it.
pub struct SubSingleBenchmarkResult<S: PlanningSolution> {
    index: usize,
    name: String,
    pub(crate) used_memory_after_input_solution: Option<u64>,
    pub(crate) score: Option<S::Score>,
    pub(crate) time_millis_spent: Option<u64>,
    pub(crate) score_calculation_count: Option<u64>,
    pub(crate) score_explanation_summary: Option<String>,
    pub(crate) random_seed: Option<u64>,
    failure: Option<SolverBenchError>,
    pub(crate) effective_statistic_map: EffectiveStatisticMap<S>,
}

impl<S: PlanningSolution> SubSingleBenchmarkResult<S> {
    /// Creates the result of run `index` of the named single benchmark.
    pub fn new(single_name: &str, index: usize, statistic_types: &[StatisticType]) -> Self {
        Self {
            index,
            name: format!("{}_{}", single_name, index),
            used_memory_after_input_solution: None,
            score: None,
            time_millis_spent: None,
            score_calculation_count: None,
            score_explanation_summary: None,
            random_seed: None,
            failure: None,
            effective_statistic_map: create_effective_statistic_map(statistic_types),
        }
    }

    /// Returns the index of the run within its single benchmark.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `"{single name}_{index}"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes in use once the problem was loaded.
    pub fn used_memory_after_input_solution(&self) -> Option<u64> {
        self.used_memory_after_input_solution
    }

    pub fn score(&self) -> Option<S::Score> {
        self.score
    }

    pub fn time_millis_spent(&self) -> Option<u64> {
        self.time_millis_spent
    }

    pub fn score_calculation_count(&self) -> Option<u64> {
        self.score_calculation_count
    }

    /// Constraint match summary, when the score director tracked matches.
    pub fn score_explanation_summary(&self) -> Option<&str> {
        self.score_explanation_summary.as_deref()
    }

    /// Seed the run's solver was built with.
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    /// Returns the error that ended the run, if any.
    pub fn failure(&self) -> Option<&SolverBenchError> {
        self.failure.as_ref()
    }

    /// Records the error that ended the run.
    pub fn set_failure(&mut self, failure: SolverBenchError) {
        self.failure = Some(failure);
    }

    /// Returns true if the run ended with an error.
    pub fn has_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Returns the statistics collected by the run, in opening order.
    pub fn effective_statistic_map(&self) -> &EffectiveStatisticMap<S> {
        &self.effective_statistic_map
    }

    /// Returns the statistic of the given type.
    pub fn statistic(&self, statistic_type: StatisticType) -> Option<&dyn SubSingleStatistic<S>> {
        self.effective_statistic_map
            .get(&statistic_type)
            .map(|statistic| statistic.as_ref())
    }

    /// Replaces the statistic registered for its type.
    pub fn insert_statistic(&mut self, statistic: Box<dyn SubSingleStatistic<S>>) {
        self.effective_statistic_map
            .insert(statistic.statistic_type(), statistic);
    }
}

impl<S: PlanningSolution> fmt::Debug for SubSingleBenchmarkResult<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubSingleBenchmarkResult")
            .field("name", &self.name)
            .field("score", &self.score)
            .field("time_millis_spent", &self.time_millis_spent)
            .field("score_calculation_count", &self.score_calculation_count)
            .field("random_seed", &self.random_seed)
            .field("failure", &self.failure)
            .field(
                "statistics",
                &self.effective_statistic_map.keys().collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
