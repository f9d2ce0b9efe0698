/*!
 * Wait-Time Estimator
 *
 * Closed-form approximations of the average waiting time each policy would give
 * a workload. Advisory only: a real run can and will differ.
 *
 * Every estimate starts from the convoy baseline `mean_burst * (n - 1)` and scales
 * it by the workload shape. Burst variance hurts arrival-ordered policies (1 + cv²)
 * and helps shortest-first ones (1 / (1 + cv)); I/O-bound processes hurt policies
 * that cannot preempt and help the time-sliced ones.
 */

use super::analysis::WorkloadAnalysis;
use crate::scheduler::SchedulingPolicy;
use serde::Serialize;
use std::cmp::Ordering;

/// Estimated average wait of one policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyEstimate {
    pub policy: SchedulingPolicy,
    pub algorithm: String,
    pub expected_avg_wait: f64,
}

/// Expected average waiting time of `policy` on the analysed workload
pub fn estimate_wait(policy: &SchedulingPolicy, analysis: &WorkloadAnalysis) -> f64 {
    if analysis.process_count < 2 {
        return 0.0;
    }

    let base = analysis.avg_burst_time * (analysis.process_count - 1) as f64;
    let cv = analysis.coefficient_of_variation;
    let io = analysis.io_bound_ratio;
    let convoy = base / 2.0 * (1.0 + cv * cv);
    let shortest_first = base / 2.0 / (1.0 + cv);

    match policy {
        SchedulingPolicy::Fcfs => convoy * (1.0 + io),
        SchedulingPolicy::Sjf => shortest_first * (1.0 + io),
        SchedulingPolicy::Srtf => shortest_first * (1.0 - 0.5 * analysis.arrival_overlap()),
        SchedulingPolicy::RoundRobin { .. } => base * 0.75 * (1.0 - io / 2.0),
        SchedulingPolicy::Priority => convoy * 0.95 * (1.0 + io),
        SchedulingPolicy::PriorityAging(_) => convoy * 0.9,
        SchedulingPolicy::Mlfq(_) => base / 2.0 * (1.0 + cv / 2.0) * (1.0 - io / 2.0),
    }
}

/// Estimate every candidate and sort ascending by expected wait
///
/// The sort is stable, so equal estimates keep the candidates' order.
pub fn rank(candidates: Vec<SchedulingPolicy>, analysis: &WorkloadAnalysis) -> Vec<PolicyEstimate> {
    let mut ranking: Vec<PolicyEstimate> = candidates
        .into_iter()
        .map(|policy| PolicyEstimate {
            algorithm: policy.to_string(),
            expected_avg_wait: estimate_wait(&policy, analysis),
            policy,
        })
        .collect();
    ranking.sort_by(|a, b| {
        a.expected_avg_wait
            .partial_cmp(&b.expected_avg_wait)
            .unwrap_or(Ordering::Equal)
    });
    ranking
}
