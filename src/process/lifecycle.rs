/*!
 * Process Lifecycle
 *
 * State machine: New → Ready → Running → Terminated, with Running → Ready on
 * preemption and a Running → Blocked → Ready edge kept for external I/O hooks.
 *
 * An illegal edge is an engine defect, so every transition asserts instead of
 * returning an error.
 */

use super::types::{Process, ProcessState};
use crate::core::types::SimTime;

impl ProcessState {
    /// Whether `self -> to` is an edge of the lifecycle graph
    pub const fn can_transition_to(self, to: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (self, to),
            (New, Ready)
                | (Ready, Running)
                | (Running, Ready)
                | (Running, Blocked)
                | (Blocked, Ready)
                | (Running, Terminated)
        )
    }
}

impl Process {
    fn transition(&mut self, to: ProcessState) {
        assert!(
            self.state.can_transition_to(to),
            "illegal lifecycle transition for P{}: {:?} -> {:?}",
            self.pid,
            self.state,
            to
        );
        self.state = to;
    }

    /// New → Ready, once `arrival_time <= now`
    pub fn admit(&mut self, now: SimTime) {
        assert!(
            self.arrival_time <= now,
            "P{} admitted at {} before its arrival at {}",
            self.pid,
            now,
            self.arrival_time
        );
        self.transition(ProcessState::Ready);
    }

    /// Ready → Running; records start and response time on the first dispatch only
    pub fn dispatch(&mut self, now: SimTime) {
        self.transition(ProcessState::Running);
        if self.response_time.is_none() {
            self.start_time = Some(now);
            self.response_time = Some(now - self.arrival_time);
        }
    }

    /// Consume `run` ms of CPU while Running
    pub fn execute(&mut self, run: SimTime) {
        assert_eq!(
            self.state,
            ProcessState::Running,
            "P{} executed while not running",
            self.pid
        );
        self.remaining_time = self
            .remaining_time
            .checked_sub(run)
            .unwrap_or_else(|| panic!("P{} remaining time would go negative", self.pid));
    }

    /// Running → Ready with work left
    pub fn preempt(&mut self) {
        assert!(self.remaining_time > 0, "P{} preempted after finishing", self.pid);
        self.transition(ProcessState::Ready);
    }

    /// Running → Terminated; derives completion, turnaround and waiting time once
    pub fn terminate(&mut self, now: SimTime) {
        assert!(self.is_complete(), "P{} terminated with work left", self.pid);
        self.transition(ProcessState::Terminated);
        self.completion_time = Some(now);
        self.turnaround_time = now - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }

    /// Running → Blocked (external I/O hook)
    pub fn block(&mut self) {
        self.transition(ProcessState::Blocked);
    }

    /// Blocked → Ready (external I/O hook)
    pub fn unblock(&mut self) {
        self.transition(ProcessState::Ready);
    }
}
