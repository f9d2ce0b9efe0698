/*!
 * CPU Scheduling Simulator Library
 *
 * Deterministic discrete-event replay of seven CPU scheduling policies over a
 * process set, with per-run metrics and an advisory adaptive policy selector.
 */

pub mod adaptive;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use adaptive::{AdaptiveSelector, Recommendation, WorkloadAnalysis};
pub use crate::core::errors::{ConfigError, SimError, WorkloadError};
pub use crate::core::types::{Pid, Priority, SchedResult, SimTime};
pub use monitoring::init_tracing;
pub use process::{validate_workload, Process, ProcessState};
pub use scheduler::{
    compare_all, AgingConfig, Comparison, ComparisonRow, EventKind, GanttEntry, MlfqConfig,
    ProcessMetrics, Scheduler, SchedulingPolicy, SchedulingResult, SimEvent, TimeQuantum,
};
