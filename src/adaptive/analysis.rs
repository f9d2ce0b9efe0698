/*!
 * Workload Analysis
 * Read-only statistical snapshot of a process set
 */

use crate::core::limits::{
    BATCH_MAX_IO_RATIO, BATCH_MIN_AVG_BURST, INTERACTIVE_MAX_AVG_BURST, INTERACTIVE_MIN_IO_RATIO,
    IO_HEAVY_RATIO, PRIORITY_RANGE_THRESHOLD, PRIORITY_VARIANCE_THRESHOLD,
};
use crate::process::Process;
use serde::Serialize;

/// Shape of a workload as seen by the selector
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkloadAnalysis {
    pub process_count: usize,
    pub avg_burst_time: f64,
    /// Sample variance (n - 1)
    pub burst_time_variance: f64,
    pub coefficient_of_variation: f64,
    pub priority_range: i64,
    pub priority_variance: f64,
    pub io_bound_ratio: f64,
    pub cpu_bound_ratio: f64,
    /// Mean gap between consecutive arrivals
    pub avg_arrival_spread: f64,
    pub is_interactive: bool,
    pub is_batch: bool,
}

impl WorkloadAnalysis {
    pub fn from_processes(processes: &[Process]) -> Self {
        let n = processes.len();
        if n == 0 {
            return Self::default();
        }

        let bursts: Vec<f64> = processes.iter().map(|p| p.burst_time as f64).collect();
        let priorities: Vec<f64> = processes.iter().map(|p| f64::from(p.priority)).collect();

        let avg_burst_time = mean(&bursts);
        let burst_time_variance = sample_variance(&bursts);
        let coefficient_of_variation = if avg_burst_time > 0.0 {
            burst_time_variance.sqrt() / avg_burst_time
        } else {
            0.0
        };

        let max_priority = processes.iter().map(|p| i64::from(p.priority)).max().unwrap_or(0);
        let min_priority = processes.iter().map(|p| i64::from(p.priority)).min().unwrap_or(0);

        let io_bound_ratio = processes.iter().filter(|p| p.io_bound).count() as f64 / n as f64;

        let mut arrivals: Vec<u64> = processes.iter().map(|p| p.arrival_time).collect();
        arrivals.sort_unstable();
        let gaps: Vec<f64> = arrivals.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
        let avg_arrival_spread = if gaps.is_empty() { 0.0 } else { mean(&gaps) };

        Self {
            process_count: n,
            avg_burst_time,
            burst_time_variance,
            coefficient_of_variation,
            priority_range: max_priority - min_priority,
            priority_variance: sample_variance(&priorities),
            io_bound_ratio,
            cpu_bound_ratio: 1.0 - io_bound_ratio,
            avg_arrival_spread,
            is_interactive: avg_burst_time < INTERACTIVE_MAX_AVG_BURST
                && io_bound_ratio > INTERACTIVE_MIN_IO_RATIO,
            is_batch: avg_burst_time > BATCH_MIN_AVG_BURST && io_bound_ratio < BATCH_MAX_IO_RATIO,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.process_count == 0
    }

    #[inline]
    pub fn is_io_heavy(&self) -> bool {
        self.io_bound_ratio >= IO_HEAVY_RATIO
    }

    /// Priorities are spread widely enough for a priority policy to matter
    #[inline]
    pub fn has_priority_spread(&self) -> bool {
        self.priority_variance > PRIORITY_VARIANCE_THRESHOLD
            && self.priority_range > PRIORITY_RANGE_THRESHOLD
    }

    /// How much arrivals overlap running work, 0 (all at once) to 1 (fully spread)
    pub fn arrival_overlap(&self) -> f64 {
        if self.avg_burst_time <= 0.0 {
            return 0.0;
        }
        (self.avg_arrival_spread / self.avg_burst_time).min(1.0)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}
