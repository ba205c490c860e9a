//! Statistic fixture logging its lifecycle calls.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

use solverbench::solver::SolverEvents;
use solverbench::statistic::{HibernatedPointList, SubSingleStatistic};
use solverbench_config::StatisticType;
use solverbench_core::{PlanningSolution, Result, SolverBenchError};

/// Lifecycle call made on a statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticOp {
    Open,
    InitPointList,
    Close,
    HibernatePointList,
    DiscardPointList,
}

/// Shared log of `(statistic, call)` pairs.
pub type StatisticLog = Arc<Mutex<Vec<(StatisticType, StatisticOp)>>>;

/// Statistic that records every lifecycle call into a shared log.
///
/// Optionally fails on one kind of call. The failing call is logged too.
#[derive(Debug)]
pub struct RecordingStatistic<S> {
    statistic_type: StatisticType,
    log: StatisticLog,
    fail_on: Option<StatisticOp>,
    hibernated: Option<HibernatedPointList>,
    _solution: PhantomData<fn() -> S>,
}

impl<S> RecordingStatistic<S> {
    pub fn new(statistic_type: StatisticType, log: StatisticLog) -> Self {
        Self {
            statistic_type,
            log,
            fail_on: None,
            hibernated: None,
            _solution: PhantomData,
        }
    }

    pub fn failing_on(mut self, op: StatisticOp) -> Self {
        self.fail_on = Some(op);
        self
    }

    fn record(&self, op: StatisticOp) -> Result<()> {
        if let Ok(mut log) = self.log.lock() {
            log.push((self.statistic_type, op));
        }
        if self.fail_on == Some(op) {
            return Err(SolverBenchError::Statistic(format!(
                "{} failed on {:?}",
                self.statistic_type.name(),
                op
            )));
        }
        Ok(())
    }
}

/// Creates an empty log.
pub fn new_statistic_log() -> StatisticLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Returns the calls logged so far.
pub fn logged_ops(log: &StatisticLog) -> Vec<(StatisticType, StatisticOp)> {
    log.lock().map(|log| log.clone()).unwrap_or_default()
}

impl<S: PlanningSolution> SubSingleStatistic<S> for RecordingStatistic<S> {
    fn statistic_type(&self) -> StatisticType {
        self.statistic_type
    }

    fn open(&mut self, _solver: &mut dyn SolverEvents<S>) -> Result<()> {
        self.record(StatisticOp::Open)
    }

    fn init_point_list(&mut self) -> Result<()> {
        self.record(StatisticOp::InitPointList)
    }

    fn close(&mut self, _solver: &mut dyn SolverEvents<S>) -> Result<()> {
        self.record(StatisticOp::Close)
    }

    fn hibernate_point_list(&mut self) -> Result<()> {
        self.record(StatisticOp::HibernatePointList)?;
        self.hibernated = Some(HibernatedPointList {
            statistic_type: self.statistic_type,
            header: "time_millis_spent".to_string(),
            rows: Vec::new(),
        });
        Ok(())
    }

    fn discard_point_list(&mut self) {
        let _ = self.record(StatisticOp::DiscardPointList);
        self.hibernated = None;
    }

    fn point_count(&self) -> usize {
        0
    }

    fn hibernated_point_list(&self) -> Option<&HibernatedPointList> {
        self.hibernated.as_ref()
    }
}
