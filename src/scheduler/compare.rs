/*!
 * Policy Comparison
 * Run every policy over fresh copies of one workload
 */

use super::result::SchedulingResult;
use super::traits::Scheduler;
use super::types::{SchedulingPolicy, TimeQuantum};
use crate::core::limits::COMPARE_TIME_QUANTUM;
use crate::core::types::{SchedResult, SimTime};
use crate::process::{validate_workload, Process};
use serde::Serialize;
use tracing::info;

/// Summary row for one policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub algorithm: String,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    pub cpu_utilization: f64,
    pub throughput: f64,
    pub context_switches: usize,
    pub total_time: SimTime,
}

impl From<&SchedulingResult> for ComparisonRow {
    fn from(result: &SchedulingResult) -> Self {
        Self {
            algorithm: result.algorithm.clone(),
            avg_waiting_time: result.avg_waiting_time,
            avg_turnaround_time: result.avg_turnaround_time,
            avg_response_time: result.avg_response_time,
            cpu_utilization: result.cpu_utilization,
            throughput: result.throughput,
            context_switches: result.context_switches,
            total_time: result.total_time,
        }
    }
}

/// All seven rows in canonical policy order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    /// Index into `rows` of the lowest average waiting time; first wins ties
    pub best: usize,
}

impl Comparison {
    #[inline]
    pub fn best_row(&self) -> &ComparisonRow {
        &self.rows[self.best]
    }
}

/// Policies used by [`compare_all`]: defaults, with Round Robin at the compare quantum
pub fn comparison_policies() -> Vec<SchedulingPolicy> {
    SchedulingPolicy::all()
        .into_iter()
        .map(|policy| match policy {
            SchedulingPolicy::RoundRobin { .. } => SchedulingPolicy::RoundRobin {
                time_quantum: TimeQuantum::new(COMPARE_TIME_QUANTUM)
                    .unwrap_or_default(),
            },
            other => other,
        })
        .collect()
}

/// Run every policy on `processes` and summarise
pub fn compare_all(processes: &[Process]) -> SchedResult<Comparison> {
    validate_workload(processes)?;

    let mut rows = Vec::with_capacity(7);
    for policy in comparison_policies() {
        let result = policy.schedule(processes)?;
        rows.push(ComparisonRow::from(&result));
    }

    let best = rows
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.avg_waiting_time.total_cmp(&b.avg_waiting_time))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    info!(best = %rows[best].algorithm, "Comparison complete");
    Ok(Comparison { rows, best })
}
