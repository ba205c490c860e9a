//! Problem I/O and memory probe fixtures that remember how they were used.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use solverbench::diagnostic::{self, SUB_SINGLE_BENCHMARK_NAME_KEY};
use solverbench::memory::MemoryProbe;
use solverbench::result::ProblemIo;
use solverbench_core::{Result, SolverBenchError};
use tracing::debug;

use crate::nqueens::NQueensSolution;

/// Problem I/O serving fresh N-Queens boards and recording written solutions.
#[derive(Debug)]
pub struct RecordingProblemIo {
    n: usize,
    fail_read: bool,
    fail_write: bool,
    read_count: AtomicUsize,
    read_names: Mutex<Vec<Option<String>>>,
    written: Mutex<Vec<(String, NQueensSolution)>>,
}

impl RecordingProblemIo {
    /// Serves unassigned boards of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            fail_read: false,
            fail_write: false,
            read_count: AtomicUsize::new(0),
            read_names: Mutex::new(Vec::new()),
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failing_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    pub fn with_failing_write(mut self) -> Self {
        self.fail_write = true;
        self
    }

    /// Number of `read_problem` calls, failed ones included.
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    /// Sub-single name bound in the diagnostic context at each read.
    pub fn read_names(&self) -> Vec<Option<String>> {
        self.read_names
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }

    /// Names of the runs whose solutions were written, in write order.
    pub fn written_names(&self) -> Vec<String> {
        self.written()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    pub fn written(&self) -> Vec<(String, NQueensSolution)> {
        self.written
            .lock()
            .map(|written| written.clone())
            .unwrap_or_default()
    }
}

impl ProblemIo<NQueensSolution> for RecordingProblemIo {
    fn read_problem(&self) -> Result<NQueensSolution> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut names) = self.read_names.lock() {
            names.push(diagnostic::get(SUB_SINGLE_BENCHMARK_NAME_KEY));
        }
        if self.fail_read {
            return Err(SolverBenchError::ProblemIo(format!(
                "cannot read {}-queens problem",
                self.n
            )));
        }
        Ok(NQueensSolution::uninitialized(self.n))
    }

    fn write_solution(&self, sub_single_name: &str, solution: &NQueensSolution) -> Result<()> {
        if self.fail_write {
            return Err(SolverBenchError::ProblemIo(format!(
                "cannot write solution of {}",
                sub_single_name
            )));
        }
        debug!(event = "solution_recorded", sub_single = sub_single_name);
        self.written
            .lock()
            .map_err(|_| SolverBenchError::InvalidState("written solutions poisoned".to_string()))?
            .push((sub_single_name.to_string(), solution.clone()));
        Ok(())
    }
}

/// Memory probe reporting a fixed reading.
#[derive(Debug, Default)]
pub struct FixedMemoryProbe {
    used_memory: Option<u64>,
    reclaim_count: AtomicUsize,
    sample_count: AtomicUsize,
}

impl FixedMemoryProbe {
    pub fn new(used_memory: u64) -> Self {
        Self {
            used_memory: Some(used_memory),
            ..Self::default()
        }
    }

    /// Probe that cannot measure.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn reclaim_count(&self) -> usize {
        self.reclaim_count.load(Ordering::SeqCst)
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count.load(Ordering::SeqCst)
    }
}

impl MemoryProbe for FixedMemoryProbe {
    fn reclaim_hint(&self) {
        self.reclaim_count.fetch_add(1, Ordering::SeqCst);
    }

    fn used_memory(&self) -> Option<u64> {
        self.sample_count.fetch_add(1, Ordering::SeqCst);
        self.used_memory
    }
}
