/*!
 * Scheduling Result
 *
 * Metrics derived once from the terminal process table and the clock. Pure
 * functions of that state; nothing here re-runs a simulation.
 */

use super::clock::{GanttEntry, SimClock, SimEvent};
use crate::core::types::{Pid, Priority, SimTime};
use crate::process::Process;
use serde::Serialize;

/// Outcome of one policy run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulingResult {
    pub algorithm: String,
    pub processes: Vec<Process>,
    pub gantt_chart: Vec<GanttEntry>,
    pub context_switches: usize,
    pub total_time: SimTime,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    pub avg_completion_time: f64,
    /// Busy share of `[0, total_time)`, in percent
    pub cpu_utilization: f64,
    /// Processes per simulated second
    pub throughput: f64,
    pub max_waiting_time: SimTime,
    pub min_waiting_time: SimTime,
    pub events: Vec<SimEvent>,
}

/// One row of the per-process report table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub name: String,
    pub arrival_time: SimTime,
    pub burst_time: SimTime,
    pub priority: Priority,
    pub start_time: SimTime,
    pub completion_time: SimTime,
    pub waiting_time: SimTime,
    pub turnaround_time: SimTime,
    pub response_time: SimTime,
}

impl SchedulingResult {
    /// Build the result of a finished run
    ///
    /// Every process must have reached Terminated; anything else is an engine defect.
    pub(crate) fn from_run(algorithm: String, mut processes: Vec<Process>, clock: SimClock) -> Self {
        if let Some(stuck) = processes.iter().find(|p| !p.is_terminated()) {
            panic!(
                "P{} finished the run in state {}",
                stuck.pid,
                stuck.state.as_str()
            );
        }
        processes.sort_by_key(|p| p.pid);
        let (total_time, gantt_chart, context_switches, events) = clock.finish();

        let count = processes.len();
        let mean = |f: fn(&Process) -> SimTime| -> f64 {
            if count == 0 {
                return 0.0;
            }
            processes.iter().map(|p| f(p) as f64).sum::<f64>() / count as f64
        };

        let avg_waiting_time = mean(|p| p.waiting_time);
        let avg_turnaround_time = mean(|p| p.turnaround_time);
        let avg_response_time = mean(|p| p.response_time.unwrap_or_default());
        let avg_completion_time = mean(|p| p.completion_time.unwrap_or_default());

        let busy: SimTime = processes.iter().map(|p| p.burst_time).sum();
        let (cpu_utilization, throughput) = if total_time == 0 {
            (0.0, 0.0)
        } else {
            (
                busy as f64 / total_time as f64 * 100.0,
                count as f64 / (total_time as f64 / 1000.0),
            )
        };

        let max_waiting_time = processes.iter().map(|p| p.waiting_time).max().unwrap_or(0);
        let min_waiting_time = processes.iter().map(|p| p.waiting_time).min().unwrap_or(0);

        Self {
            algorithm,
            processes,
            gantt_chart,
            context_switches,
            total_time,
            avg_waiting_time,
            avg_turnaround_time,
            avg_response_time,
            avg_completion_time,
            cpu_utilization,
            throughput,
            max_waiting_time,
            min_waiting_time,
            events,
        }
    }

    /// Final state of `pid`
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Report table, one row per process in pid order
    pub fn process_metrics(&self) -> Vec<ProcessMetrics> {
        self.processes
            .iter()
            .map(|p| ProcessMetrics {
                pid: p.pid,
                name: p.name.clone(),
                arrival_time: p.arrival_time,
                burst_time: p.burst_time,
                priority: p.priority,
                start_time: p.start_time.unwrap_or_default(),
                completion_time: p.completion_time.unwrap_or_default(),
                waiting_time: p.waiting_time,
                turnaround_time: p.turnaround_time,
                response_time: p.response_time.unwrap_or_default(),
            })
            .collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}
