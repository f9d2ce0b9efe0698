/*!
 * Adaptive Selector Tests
 * Directional checks: the estimator is advisory, so only orderings are asserted
 */

use pretty_assertions::assert_eq;
use sched_sim::{AdaptiveSelector, Process, Scheduler, SchedulingPolicy};

fn batch_high_variance() -> Vec<Process> {
    [300, 10, 200, 20, 150, 5, 260]
        .iter()
        .enumerate()
        .map(|(i, &burst)| Process::new(i as u32 + 1, format!("job{}", i + 1), burst))
        .collect()
}

fn interactive() -> Vec<Process> {
    [5, 8, 6, 7, 5, 9, 6, 8]
        .iter()
        .enumerate()
        .map(|(i, &burst)| {
            Process::new(i as u32 + 1, format!("ui{}", i + 1), burst)
                .with_arrival(i as u64 * 2)
                .with_io_bound(i % 2 == 0)
        })
        .collect()
}

fn priority_spread() -> Vec<Process> {
    [(20, 0), (25, 2), (30, 4), (22, 6), (28, 8), (26, 10)]
        .iter()
        .enumerate()
        .map(|(i, &(burst, priority))| {
            Process::new(i as u32 + 1, format!("svc{}", i + 1), burst).with_priority(priority)
        })
        .collect()
}

fn position(ranking: &[sched_sim::adaptive::PolicyEstimate], name: &str) -> usize {
    ranking
        .iter()
        .position(|e| e.algorithm == name)
        .unwrap_or(usize::MAX)
}

#[test]
fn test_batch_ranks_shortest_first_ahead_of_fcfs() {
    let rec = AdaptiveSelector::new().recommend(&batch_high_variance());
    assert!(rec.analysis.is_batch);
    assert!(position(&rec.ranking, "SJF") < position(&rec.ranking, "FCFS"));
    assert!(position(&rec.ranking, "SRTF") < position(&rec.ranking, "FCFS"));
    assert!(matches!(rec.policy, SchedulingPolicy::Sjf | SchedulingPolicy::Srtf));
    assert_eq!(rec.ranking.len(), 7);
}

#[test]
fn test_estimate_direction_matches_real_runs() {
    let set = batch_high_variance();
    let rec = AdaptiveSelector::new().recommend(&set);
    let fcfs = SchedulingPolicy::Fcfs.schedule(&set).unwrap();
    let recommended = rec.policy.schedule(&set).unwrap();
    assert!(recommended.avg_waiting_time < fcfs.avg_waiting_time);
}

#[test]
fn test_interactive_workload_gets_time_slicing() {
    let rec = AdaptiveSelector::new().recommend(&interactive());
    assert!(rec.analysis.is_interactive);
    assert!(matches!(
        rec.policy,
        SchedulingPolicy::RoundRobin { .. } | SchedulingPolicy::Mlfq(_)
    ));
    assert!(rec.justification.contains("I/O-bound"));
}

#[test]
fn test_priority_spread_gets_priority_variant() {
    let rec = AdaptiveSelector::new().recommend(&priority_spread());
    assert!(rec.analysis.has_priority_spread());
    assert!(matches!(
        rec.policy,
        SchedulingPolicy::Priority | SchedulingPolicy::PriorityAging(_)
    ));
    assert!(rec.confidence > 0.0 && rec.confidence <= 1.0);
}

#[test]
fn test_recommended_round_robin_uses_suggested_quantum() {
    // Many equal I/O-bound jobs of 100ms: quantum 100 / 5 = 20
    let set: Vec<Process> = (1..=6)
        .map(|pid| {
            Process::new(pid, "io", 100)
                .with_arrival(u64::from(pid) * 3)
                .with_io_bound(true)
        })
        .collect();
    let rec = AdaptiveSelector::new().recommend(&set);
    let rr = rec
        .ranking
        .iter()
        .find(|e| matches!(e.policy, SchedulingPolicy::RoundRobin { .. }))
        .unwrap();
    assert_eq!(rr.algorithm, "Round Robin (q=20)");
}

#[test]
fn test_expected_wait_reported_for_choice() {
    let rec = AdaptiveSelector::new().recommend(&batch_high_variance());
    let top = rec
        .ranking
        .iter()
        .find(|e| e.algorithm == rec.algorithm_name)
        .unwrap();
    assert_eq!(top.expected_avg_wait, rec.expected_avg_wait);
    assert!(rec.justification.ends_with("ms"));
}
