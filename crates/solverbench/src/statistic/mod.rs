//! Statistic collectors attached to a solver during a benchmark run.
//!
//! A statistic samples one time series per run. The run task drives every
//! statistic through the same lifecycle:
//!
//! `open(solver)` -> `init_point_list()` -> solve -> `close(solver)` ->
//! `hibernate_point_list()`
//!
//! Samples are stored as type-tagged [`StatisticPoint`]s so the run task never
//! needs to know what a statistic measures. Hibernation renders the samples to
//! CSV rows, after which the statistic holds nothing tied to the solver.

mod listener;
mod sub_single;

use std::collections::BTreeMap;

use solverbench_config::StatisticType;
use solverbench_core::{PlanningSolution, Result};

use crate::solver::SolverEvents;

pub use sub_single::ListenerSubSingleStatistic;

/// Default minimum distance between two score calculation speed samples.
pub const DEFAULT_SPEED_INTERVAL_MILLIS: u64 = 1000;

/// Ordered map of the statistics collected during one run.
///
/// Iteration follows the declaration order of [`StatisticType`], which is the
/// order statistics are opened and closed in.
pub type EffectiveStatisticMap<S> = BTreeMap<StatisticType, Box<dyn SubSingleStatistic<S>>>;

/// One sample of a statistic.
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticPoint {
    /// A score observed at a point in time.
    Score {
        time_millis_spent: u64,
        levels: Vec<i64>,
    },
    /// Score calculations per second since the previous sample.
    ScoreCalculationSpeed {
        time_millis_spent: u64,
        per_second: u64,
    },
    /// Move counts of one step.
    MoveCount {
        time_millis_spent: u64,
        accepted: u64,
        selected: u64,
    },
}

impl StatisticPoint {
    /// Returns when the sample was taken.
    pub fn time_millis_spent(&self) -> u64 {
        match self {
            StatisticPoint::Score {
                time_millis_spent, ..
            }
            | StatisticPoint::ScoreCalculationSpeed {
                time_millis_spent, ..
            }
            | StatisticPoint::MoveCount {
                time_millis_spent, ..
            } => *time_millis_spent,
        }
    }

    /// Renders the sample as one CSV row.
    pub fn to_csv_row(&self) -> String {
        match self {
            StatisticPoint::Score {
                time_millis_spent,
                levels,
            } => {
                let mut row = time_millis_spent.to_string();
                for level in levels {
                    row.push(',');
                    row.push_str(&level.to_string());
                }
                row
            }
            StatisticPoint::ScoreCalculationSpeed {
                time_millis_spent,
                per_second,
            } => format!("{},{}", time_millis_spent, per_second),
            StatisticPoint::MoveCount {
                time_millis_spent,
                accepted,
                selected,
            } => format!("{},{},{}", time_millis_spent, accepted, selected),
        }
    }
}

/// Samples of a finished statistic, detached from the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HibernatedPointList {
    /// Which statistic produced the rows.
    pub statistic_type: StatisticType,
    /// CSV header line.
    pub header: String,
    /// One CSV line per sample, in sampling order.
    pub rows: Vec<String>,
}

impl HibernatedPointList {
    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no sample was taken.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the header and all rows as a CSV document.
    pub fn to_csv(&self) -> String {
        let mut csv = String::with_capacity(self.header.len() + 16 * self.rows.len());
        csv.push_str(&self.header);
        csv.push('\n');
        for row in &self.rows {
            csv.push_str(row);
            csv.push('\n');
        }
        csv
    }
}

/// A statistic collected during one run.
///
/// `open` must precede any sample collection and `close` must precede
/// `hibernate_point_list`. Opening twice, or closing twice, on the same solver
/// has no further effect.
pub trait SubSingleStatistic<S: PlanningSolution>: Send {
    /// Returns which time series this statistic collects.
    fn statistic_type(&self) -> StatisticType;

    /// Attaches listeners to the solver.
    fn open(&mut self, solver: &mut dyn SolverEvents<S>) -> Result<()>;

    /// Allocates empty storage for samples, dropping earlier samples.
    fn init_point_list(&mut self) -> Result<()>;

    /// Detaches the listeners attached by `open`.
    fn close(&mut self, solver: &mut dyn SolverEvents<S>) -> Result<()>;

    /// Converts the samples to their solver-independent form.
    fn hibernate_point_list(&mut self) -> Result<()>;

    /// Drops every sample, live or hibernated, of the current run.
    fn discard_point_list(&mut self);

    /// Returns the number of samples taken so far.
    fn point_count(&self) -> usize;

    /// Returns the hibernated samples, once hibernated.
    fn hibernated_point_list(&self) -> Option<&HibernatedPointList>;
}

/// Creates the statistic collecting `statistic_type`.
pub fn create_sub_single_statistic<S: PlanningSolution>(
    statistic_type: StatisticType,
) -> Box<dyn SubSingleStatistic<S>> {
    Box::new(ListenerSubSingleStatistic::<S>::new(statistic_type))
}

/// Creates the effective statistic map for one run.
pub fn create_effective_statistic_map<S: PlanningSolution>(
    statistic_types: &[StatisticType],
) -> EffectiveStatisticMap<S> {
    statistic_types
        .iter()
        .map(|statistic_type| (*statistic_type, create_sub_single_statistic(*statistic_type)))
        .collect()
}

#[cfg(test)]
mod tests;
