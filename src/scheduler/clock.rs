/*!
 * Simulation Clock
 *
 * Explicit per-run context threaded through every policy: simulated time, the
 * Gantt chart, the context-switch counter and the event log.
 */

use crate::core::serde::is_none;
use crate::core::types::{Pid, SimTime};
use crate::process::Process;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// One uninterrupted span of CPU ownership, `[start_time, end_time)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    pub pid: Pid,
    pub start_time: SimTime,
    pub end_time: SimTime,
}

impl GanttEntry {
    #[inline]
    pub const fn duration(&self) -> SimTime {
        self.end_time - self.start_time
    }
}

/// What happened at a point of simulated time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Arrived,
    Dispatched,
    Preempted,
    Completed,
    Demoted { level: usize },
    Aged { effective_priority: i64 },
    PriorityBoost,
    Idle { until: SimTime },
}

/// Event log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimEvent {
    pub time: SimTime,
    #[serde(skip_serializing_if = "is_none")]
    pub pid: Option<Pid>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:05}ms] ", self.time)?;
        if let Some(pid) = self.pid {
            write!(f, "P{} ", pid)?;
        }
        match self.kind {
            EventKind::Arrived => f.write_str("added to ready queue"),
            EventKind::Dispatched => f.write_str("dispatched"),
            EventKind::Preempted => f.write_str("preempted"),
            EventKind::Completed => f.write_str("completed"),
            EventKind::Demoted { level } => write!(f, "demoted to level {}", level),
            EventKind::Aged { effective_priority } => {
                write!(f, "aged (effective priority: {})", effective_priority)
            }
            EventKind::PriorityBoost => f.write_str("priority boost: all processes to level 0"),
            EventKind::Idle { until } => write!(f, "CPU idle until {}ms", until),
        }
    }
}

/// Per-run simulation context
#[derive(Debug, Default)]
pub struct SimClock {
    now: SimTime,
    gantt: Vec<GanttEntry>,
    context_switches: usize,
    last_pid: Option<Pid>,
    events: Vec<SimEvent>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn gantt(&self) -> &[GanttEntry] {
        &self.gantt
    }

    #[inline]
    pub fn context_switches(&self) -> usize {
        self.context_switches
    }

    #[inline]
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn log(&mut self, pid: Option<Pid>, kind: EventKind) {
        let event = SimEvent {
            time: self.now,
            pid,
            kind,
        };
        debug!(time = self.now, pid = ?pid, event = %event, "sim event");
        self.events.push(event);
    }

    /// Jump straight to `until` while nothing is ready
    pub fn idle_until(&mut self, until: SimTime) {
        assert!(until >= self.now, "clock moved backwards: {} -> {}", self.now, until);
        if until > self.now {
            self.log(None, EventKind::Idle { until });
            self.now = until;
        }
    }

    /// Hand the CPU to `process`
    ///
    /// A context switch is counted only when the owner changes identity.
    pub fn dispatch(&mut self, process: &mut Process) {
        if self.last_pid.is_some_and(|last| last != process.pid) {
            self.context_switches += 1;
        }
        self.last_pid = Some(process.pid);
        process.dispatch(self.now);
        self.log(Some(process.pid), EventKind::Dispatched);
    }

    /// Run the current owner for `run` ms, terminating it if it finishes
    pub fn run(&mut self, process: &mut Process, run: SimTime) {
        assert!(run > 0, "zero-length slice for P{}", process.pid);
        assert_eq!(self.last_pid, Some(process.pid), "P{} runs without dispatch", process.pid);

        process.execute(run);
        let start = self.now;
        self.now += run;

        match self.gantt.last_mut() {
            Some(entry) if entry.pid == process.pid && entry.end_time == start => {
                entry.end_time = self.now;
            }
            _ => self.gantt.push(GanttEntry {
                pid: process.pid,
                start_time: start,
                end_time: self.now,
            }),
        }

        if process.is_complete() {
            process.terminate(self.now);
            self.log(Some(process.pid), EventKind::Completed);
        }
    }

    /// Split into the pieces the result keeps
    pub(super) fn finish(self) -> (SimTime, Vec<GanttEntry>, usize, Vec<SimEvent>) {
        (self.now, self.gantt, self.context_switches, self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(pid: Pid, burst: SimTime) -> Process {
        let mut p = Process::new(pid, format!("P{}", pid), burst);
        p.admit(0);
        p
    }

    #[test]
    fn test_contiguous_slices_merge() {
        let mut clock = SimClock::new();
        let mut p = ready(1, 6);

        clock.dispatch(&mut p);
        clock.run(&mut p, 2);
        clock.run(&mut p, 4);

        assert_eq!(
            clock.gantt(),
            &[GanttEntry {
                pid: 1,
                start_time: 0,
                end_time: 6
            }]
        );
        assert!(p.is_terminated());
        assert_eq!(p.completion_time, Some(6));
    }

    #[test]
    fn test_switch_counted_on_identity_change_only() {
        let mut clock = SimClock::new();
        let mut a = ready(1, 4);
        let mut b = ready(2, 2);

        clock.dispatch(&mut a);
        clock.run(&mut a, 2);
        a.preempt();
        // Same process again: not a switch
        clock.dispatch(&mut a);
        clock.run(&mut a, 1);
        a.preempt();
        clock.dispatch(&mut b);
        clock.run(&mut b, 2);
        clock.idle_until(10);
        clock.dispatch(&mut a);
        clock.run(&mut a, 1);

        assert_eq!(clock.context_switches(), 2);
        assert_eq!(clock.gantt().len(), 3);
        assert_eq!(clock.now(), 11);
    }

    #[test]
    fn test_event_display() {
        let event = SimEvent {
            time: 12,
            pid: Some(3),
            kind: EventKind::Dispatched,
        };
        assert_eq!(event.to_string(), "[00012ms] P3 dispatched");
    }
}
