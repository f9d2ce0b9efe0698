/*!
 * Process Types
 * The scheduled entity: inputs supplied by the caller plus per-run state
 */

use crate::core::serde::{is_false, is_none};
use crate::core::types::{Pid, Priority, SimTime};
use serde::{Deserialize, Serialize};

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created, not yet arrived
    #[default]
    New,
    /// Waiting in a ready queue
    Ready,
    /// Owns the simulated CPU
    Running,
    /// Waiting for I/O; only entered through external hooks
    Blocked,
    /// Finished; absorbing
    Terminated,
}

impl ProcessState {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Blocked => "blocked",
            Self::Terminated => "terminated",
        }
    }
}

/// A simulated process
///
/// Scheduling inputs (`pid`, `name`, `burst_time`, `arrival_time`, `priority`, `io_bound`)
/// are fixed for a run. Everything else is runtime state owned by the active scheduler
/// and cleared by [`Process::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub name: String,
    /// Total CPU demand (ms)
    pub burst_time: SimTime,
    #[serde(default)]
    pub arrival_time: SimTime,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "is_false")]
    pub io_bound: bool,

    #[serde(skip_deserializing)]
    pub state: ProcessState,
    #[serde(skip_deserializing)]
    pub remaining_time: SimTime,
    #[serde(skip_deserializing, skip_serializing_if = "is_none")]
    pub start_time: Option<SimTime>,
    #[serde(skip_deserializing, skip_serializing_if = "is_none")]
    pub completion_time: Option<SimTime>,
    #[serde(skip_deserializing)]
    pub waiting_time: SimTime,
    #[serde(skip_deserializing)]
    pub turnaround_time: SimTime,
    /// Time from arrival to first dispatch
    #[serde(skip_deserializing, skip_serializing_if = "is_none")]
    pub response_time: Option<SimTime>,
    /// MLFQ level (0 is the highest)
    #[serde(skip_deserializing)]
    pub queue_level: usize,
    /// Aging steps accumulated under Priority-with-Aging
    #[serde(skip_deserializing)]
    pub aging_counter: i32,
}

impl Process {
    pub fn new(pid: Pid, name: impl Into<String>, burst_time: SimTime) -> Self {
        Self {
            pid,
            name: name.into(),
            burst_time,
            arrival_time: 0,
            priority: 0,
            io_bound: false,
            state: ProcessState::New,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            waiting_time: 0,
            turnaround_time: 0,
            response_time: None,
            queue_level: 0,
            aging_counter: 0,
        }
    }

    pub fn with_arrival(mut self, arrival_time: SimTime) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_io_bound(mut self, io_bound: bool) -> Self {
        self.io_bound = io_bound;
        self
    }

    /// Clear every runtime field and reseed `remaining_time`
    pub fn reset(&mut self) {
        self.state = ProcessState::New;
        self.remaining_time = self.burst_time;
        self.start_time = None;
        self.completion_time = None;
        self.waiting_time = 0;
        self.turnaround_time = 0;
        self.response_time = None;
        self.queue_level = 0;
        self.aging_counter = 0;
    }

    /// Priority after aging (lower is more urgent)
    #[inline]
    pub fn effective_priority(&self) -> i64 {
        i64::from(self.priority) - i64::from(self.aging_counter)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_reset() {
        let mut p = Process::new(1, "editor", 12)
            .with_arrival(4)
            .with_priority(2)
            .with_io_bound(true);
        assert_eq!(p.remaining_time, 12);
        assert_eq!(p.state, ProcessState::New);

        p.remaining_time = 3;
        p.response_time = Some(9);
        p.queue_level = 2;
        p.aging_counter = 5;
        p.reset();

        assert_eq!(p.remaining_time, 12);
        assert_eq!(p.response_time, None);
        assert_eq!(p.queue_level, 0);
        assert_eq!(p.aging_counter, 0);
        assert_eq!(p.arrival_time, 4);
    }

    #[test]
    fn test_effective_priority_goes_below_zero() {
        let mut p = Process::new(1, "a", 1).with_priority(1);
        p.aging_counter = 4;
        assert_eq!(p.effective_priority(), -3);
    }

    #[test]
    fn test_deserialize_descriptor_ignores_runtime_fields() {
        let json = r#"{"pid": 3, "name": "db", "burst_time": 8, "arrival_time": 2,
                       "priority": 1, "io_bound": true, "remaining_time": 99}"#;
        let p: Process = serde_json::from_str(json).unwrap();
        assert_eq!(p.pid, 3);
        assert!(p.io_bound);
        // Runtime fields are reseeded on reset, never trusted from input
        assert_eq!(p.remaining_time, 0);
        assert_eq!(p.state, ProcessState::New);
    }
}
