/*!
 * Adaptive Selector
 *
 * Ranks all seven policies by estimated wait, then lets the workload class
 * override the pure ranking within the best few candidates.
 */

use super::analysis::WorkloadAnalysis;
use super::estimator::{rank, PolicyEstimate};
use crate::core::limits::{
    MAX_SUGGESTED_QUANTUM, MIN_SUGGESTED_QUANTUM, QUANTUM_DIVISOR, TOP_RANKED_SUBSET,
};
use crate::core::types::SimTime;
use crate::process::Process;
use crate::scheduler::{SchedulingPolicy, TimeQuantum};
use serde::Serialize;
use tracing::{debug, info};

/// Selector output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub policy: SchedulingPolicy,
    pub algorithm_name: String,
    pub justification: String,
    pub expected_avg_wait: f64,
    /// 0.0 to 1.0
    pub confidence: f64,
    pub analysis: WorkloadAnalysis,
    /// All candidates, best first
    pub ranking: Vec<PolicyEstimate>,
}

/// Workload-driven policy recommendation
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveSelector;

impl AdaptiveSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, processes: &[Process]) -> WorkloadAnalysis {
        WorkloadAnalysis::from_processes(processes)
    }

    /// Recommend one policy for `processes`; never touches process state
    pub fn recommend(&self, processes: &[Process]) -> Recommendation {
        let analysis = self.analyze(processes);
        if analysis.is_empty() {
            return Recommendation {
                policy: SchedulingPolicy::Fcfs,
                algorithm_name: SchedulingPolicy::Fcfs.to_string(),
                justification: "No processes to schedule. FCFS selected as default.".to_string(),
                expected_avg_wait: 0.0,
                confidence: 1.0,
                analysis,
                ranking: Vec::new(),
            };
        }

        let ranking = rank(candidates(&analysis), &analysis);
        let top = &ranking[..TOP_RANKED_SUBSET.min(ranking.len())];
        debug!(
            top = ?top.iter().map(|e| e.algorithm.as_str()).collect::<Vec<_>>(),
            "policies ranked"
        );

        let interactive = analysis.is_interactive || analysis.is_io_heavy();
        let preferred = if interactive {
            best_of(top, |p| {
                matches!(p, SchedulingPolicy::RoundRobin { .. } | SchedulingPolicy::Mlfq(_))
            })
        } else if analysis.has_priority_spread() {
            best_of(top, |p| {
                matches!(p, SchedulingPolicy::Priority | SchedulingPolicy::PriorityAging(_))
            })
        } else {
            None
        };
        let chosen = preferred.unwrap_or(&ranking[0]).clone();

        let recommendation = Recommendation {
            algorithm_name: chosen.algorithm.clone(),
            justification: justify(&chosen, &analysis),
            expected_avg_wait: chosen.expected_avg_wait,
            confidence: confidence(&chosen.policy),
            policy: chosen.policy,
            analysis,
            ranking,
        };
        info!(
            policy = %recommendation.algorithm_name,
            expected_avg_wait = recommendation.expected_avg_wait,
            "Policy recommended"
        );
        recommendation
    }
}

/// Round Robin quantum scaled to the average burst
pub fn suggested_quantum(analysis: &WorkloadAnalysis) -> SimTime {
    let scaled = (analysis.avg_burst_time / QUANTUM_DIVISOR) as SimTime;
    scaled.clamp(MIN_SUGGESTED_QUANTUM, MAX_SUGGESTED_QUANTUM)
}

/// Every policy at its defaults, with Round Robin at the suggested quantum
fn candidates(analysis: &WorkloadAnalysis) -> Vec<SchedulingPolicy> {
    let quantum = TimeQuantum::new(suggested_quantum(analysis)).unwrap_or_default();
    SchedulingPolicy::all()
        .into_iter()
        .map(|policy| match policy {
            SchedulingPolicy::RoundRobin { .. } => SchedulingPolicy::RoundRobin {
                time_quantum: quantum,
            },
            other => other,
        })
        .collect()
}

fn best_of(
    top: &[PolicyEstimate],
    wanted: impl Fn(&SchedulingPolicy) -> bool,
) -> Option<&PolicyEstimate> {
    top.iter().find(|estimate| wanted(&estimate.policy))
}

fn confidence(policy: &SchedulingPolicy) -> f64 {
    match policy {
        SchedulingPolicy::Fcfs => 0.75,
        SchedulingPolicy::Sjf => 0.85,
        SchedulingPolicy::Srtf => 0.90,
        SchedulingPolicy::RoundRobin { .. } => 0.80,
        SchedulingPolicy::Priority => 0.75,
        SchedulingPolicy::PriorityAging(_) => 0.85,
        SchedulingPolicy::Mlfq(_) => 0.85,
    }
}

fn justify(chosen: &PolicyEstimate, analysis: &WorkloadAnalysis) -> String {
    let n = analysis.process_count;
    let cv = analysis.coefficient_of_variation;
    let io_pct = analysis.io_bound_ratio * 100.0;
    let wait = chosen.expected_avg_wait;

    match &chosen.policy {
        SchedulingPolicy::Fcfs => format!(
            "Low burst time variance (CV={cv:.2}) with {n} processes. FCFS provides simplicity \
             and fairness with minimal overhead. Expected avg wait time: {wait:.0}ms"
        ),
        SchedulingPolicy::Sjf => format!(
            "Burst variance (CV={cv:.2}) with {n} processes. SJF minimizes average waiting time \
             for non-preemptive scheduling. Expected avg wait time: {wait:.0}ms"
        ),
        SchedulingPolicy::Srtf => format!(
            "Burst variance (CV={cv:.2}) with {n} processes. SRTF preempts in favour of the \
             shortest remaining work as jobs arrive. Expected avg wait time: {wait:.0}ms"
        ),
        SchedulingPolicy::RoundRobin { time_quantum } => format!(
            "Interactive workload detected with {n} processes and {io_pct:.0}% I/O-bound \
             processes. Round Robin ensures fair CPU time distribution and good response time. \
             Time quantum set to {}ms. Expected avg wait time: {wait:.0}ms",
            time_quantum.as_millis()
        ),
        SchedulingPolicy::Priority => format!(
            "High priority variance (range={}) detected with {n} processes. Priority scheduling \
             ensures critical processes are handled first. Expected avg wait time: {wait:.0}ms",
            analysis.priority_range
        ),
        SchedulingPolicy::PriorityAging(_) => format!(
            "High priority variance (range={}) with {n} processes ({io_pct:.0}% I/O-bound). \
             Preemptive priority with aging prevents starvation while ensuring critical \
             processes run first. Expected avg wait time: {wait:.0}ms",
            analysis.priority_range
        ),
        SchedulingPolicy::Mlfq(_) => format!(
            "Mixed interactive workload with {n} processes ({io_pct:.0}% I/O-bound). MLFQ adapts \
             to process behavior, favoring short processes while boosting longer ones to prevent \
             starvation. Expected avg wait time: {wait:.0}ms"
        ),
    }
}
