/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler construction errors
///
/// Raised before any simulation step runs; parameters are never clamped to a default.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid time quantum: {0} (must be > 0)")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("Round Robin needs a positive time quantum in milliseconds.")
    )]
    InvalidQuantum(u64),

    #[error("Invalid aging interval: {0} (must be > 0)")]
    #[diagnostic(
        code(config::invalid_aging_interval),
        help("Aging interval is the simulated time between two aging steps.")
    )]
    InvalidAgingInterval(u64),

    #[error("Invalid aging amount: {0} (must be > 0)")]
    #[diagnostic(
        code(config::invalid_aging_amount),
        help("Each aging step must lower the effective priority value by at least 1.")
    )]
    InvalidAgingAmount(i32),

    #[error("Invalid boost interval: {0} (must be > 0)")]
    #[diagnostic(
        code(config::invalid_boost_interval),
        help("MLFQ moves every process back to level 0 once per boost interval.")
    )]
    InvalidBoostInterval(u64),

    #[error("MLFQ needs at least one queue level")]
    #[diagnostic(
        code(config::empty_quantum_vector),
        help("Pass one quantum per level, e.g. [8, 16, null].")
    )]
    EmptyQuantumVector,

    #[error("Invalid quantum for MLFQ level {level}: {quantum} (must be > 0)")]
    #[diagnostic(code(config::invalid_level_quantum))]
    InvalidLevelQuantum { level: usize, quantum: u64 },

    #[error("MLFQ level {level} has no quantum but is not the last level")]
    #[diagnostic(
        code(config::unbounded_level),
        help("Only the lowest level may run processes to completion.")
    )]
    UnboundedLevel { level: usize },

    #[error("Unknown scheduling policy '{0}'")]
    #[diagnostic(
        code(config::unknown_policy),
        help("Valid: fcfs, sjf, srtf, round_robin, priority, priority_aging, mlfq")
    )]
    UnknownPolicy(String),
}

/// Malformed process sets, detected at `schedule()` entry
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum WorkloadError {
    #[error("Duplicate pid {0} in process set")]
    #[diagnostic(
        code(workload::duplicate_pid),
        help("Every process in one run needs a unique pid.")
    )]
    DuplicatePid(Pid),

    #[error("Process {0} has a zero burst time")]
    #[diagnostic(
        code(workload::zero_burst),
        help("Burst time is the total CPU demand and must be > 0.")
    )]
    ZeroBurst(Pid),

    #[error("Timeline overflows at process {0}: latest arrival plus total burst exceeds u64 ms")]
    #[diagnostic(
        code(workload::time_overflow),
        help("The whole run must end within u64::MAX simulated milliseconds.")
    )]
    TimeOverflow(Pid),
}

/// Unified simulator error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Workload error: {0}")]
    #[diagnostic(transparent)]
    Workload(#[from] WorkloadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = WorkloadError::DuplicatePid(7);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"error_type":"duplicate_pid","details":7}"#);

        let back: WorkloadError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_sim_error_wraps_sources() {
        let err: SimError = ConfigError::InvalidQuantum(0).into();
        assert!(matches!(err, SimError::Config(ConfigError::InvalidQuantum(0))));
        assert!(err.to_string().contains("must be > 0"));
    }
}
