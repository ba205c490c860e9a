//! Listener-backed statistic implementation.

use std::sync::Arc;

use solverbench_config::StatisticType;
use solverbench_core::{PlanningSolution, Result, Score, SolverBenchError};
use tracing::debug;

use super::listener::PointListener;
use super::{HibernatedPointList, StatisticPoint, SubSingleStatistic, DEFAULT_SPEED_INTERVAL_MILLIS};
use crate::event::ListenerId;
use crate::solver::SolverEvents;

/// Statistic that samples solver events through a registered listener.
pub struct ListenerSubSingleStatistic<S: PlanningSolution> {
    statistic_type: StatisticType,
    listener: Arc<PointListener<S>>,
    registration: Option<ListenerId>,
    hibernated: Option<HibernatedPointList>,
}

impl<S: PlanningSolution> ListenerSubSingleStatistic<S> {
    /// Creates a statistic of the given type.
    pub fn new(statistic_type: StatisticType) -> Self {
        Self::with_interval_millis(statistic_type, DEFAULT_SPEED_INTERVAL_MILLIS)
    }

    /// Creates a statistic sampling speed at most once per `interval_millis`.
    ///
    /// The interval only affects [`StatisticType::ScoreCalculationSpeed`].
    pub fn with_interval_millis(statistic_type: StatisticType, interval_millis: u64) -> Self {
        Self {
            statistic_type,
            listener: Arc::new(PointListener::new(statistic_type, interval_millis)),
            registration: None,
            hibernated: None,
        }
    }

    /// Returns true while a listener is attached to a solver.
    pub fn is_open(&self) -> bool {
        self.registration.is_some()
    }

    /// Returns a copy of the samples collected so far.
    pub fn points(&self) -> Vec<StatisticPoint> {
        self.listener.snapshot_points()
    }

    fn header(&self) -> String {
        match self.statistic_type {
            StatisticType::BestScore | StatisticType::StepScore => {
                let mut header = String::from("time_millis_spent");
                for index in 0..S::Score::levels_count() {
                    header.push(',');
                    header.push_str(S::Score::level_label(index).label());
                }
                header
            }
            StatisticType::ScoreCalculationSpeed => {
                "time_millis_spent,score_calculation_speed".to_string()
            }
            StatisticType::MoveCountPerStep => {
                "time_millis_spent,accepted_move_count,selected_move_count".to_string()
            }
        }
    }
}

impl<S: PlanningSolution> std::fmt::Debug for ListenerSubSingleStatistic<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSubSingleStatistic")
            .field("statistic_type", &self.statistic_type)
            .field("registration", &self.registration)
            .field("hibernated", &self.hibernated.is_some())
            .finish()
    }
}

impl<S: PlanningSolution> SubSingleStatistic<S> for ListenerSubSingleStatistic<S> {
    fn statistic_type(&self) -> StatisticType {
        self.statistic_type
    }

    fn open(&mut self, solver: &mut dyn SolverEvents<S>) -> Result<()> {
        if let Some(id) = self.registration {
            if solver.event_support().contains(id) {
                debug!(
                    event = "statistic_already_open",
                    statistic = self.statistic_type.name()
                );
                return Ok(());
            }
            return Err(SolverBenchError::Statistic(format!(
                "{} statistic is already open on another solver",
                self.statistic_type.name()
            )));
        }
        let listener = self.listener.clone();
        self.registration = Some(solver.event_support().add_listener(listener));
        Ok(())
    }

    fn init_point_list(&mut self) -> Result<()> {
        self.listener.init_points();
        self.hibernated = None;
        Ok(())
    }

    fn close(&mut self, solver: &mut dyn SolverEvents<S>) -> Result<()> {
        let Some(id) = self.registration else {
            return Ok(());
        };
        if !solver.event_support().remove_listener(id) {
            return Err(SolverBenchError::Statistic(format!(
                "{} statistic is not attached to this solver",
                self.statistic_type.name()
            )));
        }
        self.registration = None;
        Ok(())
    }

    fn hibernate_point_list(&mut self) -> Result<()> {
        if self.registration.is_some() {
            return Err(SolverBenchError::Statistic(format!(
                "{} statistic must be closed before hibernating",
                self.statistic_type.name()
            )));
        }
        let points = self.listener.take_points().ok_or_else(|| {
            SolverBenchError::Statistic(format!(
                "{} statistic point list was never initialized",
                self.statistic_type.name()
            ))
        })?;
        self.hibernated = Some(HibernatedPointList {
            statistic_type: self.statistic_type,
            header: self.header(),
            rows: points.iter().map(StatisticPoint::to_csv_row).collect(),
        });
        Ok(())
    }

    fn discard_point_list(&mut self) {
        let discarded = self.listener.take_points().map_or(0, |points| points.len())
            + self.hibernated.take().map_or(0, |hibernated| hibernated.len());
        debug!(
            event = "statistic_discarded",
            statistic = self.statistic_type.name(),
            discarded,
        );
    }

    fn point_count(&self) -> usize {
        match &self.hibernated {
            Some(hibernated) => hibernated.len(),
            None => self.listener.point_count(),
        }
    }

    fn hibernated_point_list(&self) -> Option<&HibernatedPointList> {
        self.hibernated.as_ref()
    }
}
