//! Memory baseline probe.
//!
//! The run task records how much memory the process uses once the input
//! problem is loaded. Memory is a process-wide observation, so the probe is
//! only consulted when no sibling benchmark runs at the same time.

use std::fmt::Debug;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

/// Samples process memory usage.
pub trait MemoryProbe: Send + Sync + Debug {
    /// Asks the allocator to release what it can before sampling.
    ///
    /// A hint only; implementations may do nothing.
    fn reclaim_hint(&self) {}

    /// Returns the bytes currently used by the process, if measurable.
    fn used_memory(&self) -> Option<u64>;
}

/// Probe reading the resident set size of the current process.
#[derive(Debug, Default)]
pub struct SystemMemoryProbe;

impl SystemMemoryProbe {
    /// Creates a probe for the current process.
    pub fn new() -> Self {
        Self
    }
}

impl MemoryProbe for SystemMemoryProbe {
    fn used_memory(&self) -> Option<u64> {
        let pid: Pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(reason) => {
                debug!(event = "memory_probe_unavailable", reason);
                return None;
            }
        };
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(pid).map(|process| process.memory())
    }
}

/// Probe that never measures anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMemoryProbe;

impl MemoryProbe for NoopMemoryProbe {
    fn used_memory(&self) -> Option<u64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_probe_measures_current_process() {
        let probe = SystemMemoryProbe::new();
        probe.reclaim_hint();
        if let Some(used) = probe.used_memory() {
            assert!(used > 0);
        }
    }

    #[test]
    fn test_noop_probe() {
        assert_eq!(NoopMemoryProbe.used_memory(), None);
    }
}
