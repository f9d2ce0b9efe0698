/*!
 * Scheduling Policies
 *
 * The seven policies form one closed enum; each variant delegates its run loop to a
 * free function that works on the shared ready queue and clock.
 */

mod aging;
mod mlfq;
mod non_preemptive;
mod round_robin;
mod srtf;

use super::clock::SimClock;
use super::queue::ReadyQueue;
use super::result::SchedulingResult;
use super::traits::Scheduler;
use super::types::SchedulingPolicy;
use crate::core::types::SchedResult;
use crate::process::{validate_workload, Process};
use tracing::{info, instrument};

/// Ordering key: smaller runs first, ties fall back to arrival then pid
type SelectionKey = (i64, u64, u32);

fn min_by_key(
    ready: &ReadyQueue,
    table: &[Process],
    key: impl Fn(&Process) -> SelectionKey,
) -> Option<usize> {
    ready.iter().min_by_key(|&idx| key(&table[idx]))
}

impl SchedulingPolicy {
    /// Selection key of `process` under this policy
    ///
    /// Round Robin and MLFQ select by queue position; for them only the arrival
    /// tie-break is meaningful.
    pub(crate) fn selection_key(&self, process: &Process) -> SelectionKey {
        let primary = match self {
            Self::Fcfs | Self::RoundRobin { .. } | Self::Mlfq(_) => 0,
            Self::Sjf => process.burst_time as i64,
            Self::Srtf => process.remaining_time as i64,
            Self::Priority => i64::from(process.priority),
            Self::PriorityAging(_) => process.effective_priority(),
        };
        (primary, process.arrival_time, process.pid)
    }
}

impl Scheduler for SchedulingPolicy {
    fn name(&self) -> String {
        self.to_string()
    }

    fn select_next(&self, ready: &ReadyQueue, table: &[Process]) -> Option<usize> {
        match self {
            Self::RoundRobin { .. } => ready.front(0),
            Self::Mlfq(_) => ready
                .highest_ready_level()
                .and_then(|level| ready.front(level)),
            _ => min_by_key(ready, table, |p| self.selection_key(p)),
        }
    }

    #[instrument(skip_all, fields(policy = self.as_str(), processes = processes.len()))]
    fn schedule(&self, processes: &[Process]) -> SchedResult<SchedulingResult> {
        validate_workload(processes)?;

        let mut table: Vec<Process> = processes.to_vec();
        for process in &mut table {
            process.reset();
        }

        let mut ready = ReadyQueue::with_levels(self.queue_levels());
        let mut clock = SimClock::new();

        match self {
            Self::Fcfs | Self::Sjf | Self::Priority => {
                non_preemptive::run(self, &mut table, &mut ready, &mut clock)
            }
            Self::Srtf => srtf::run(self, &mut table, &mut ready, &mut clock),
            Self::RoundRobin { time_quantum } => {
                round_robin::run(self, *time_quantum, &mut table, &mut ready, &mut clock)
            }
            Self::PriorityAging(config) => {
                aging::run(self, config, &mut table, &mut ready, &mut clock)
            }
            Self::Mlfq(config) => mlfq::run(self, config, &mut table, &mut ready, &mut clock),
        }

        let result = SchedulingResult::from_run(self.name(), table, clock);
        info!(
            policy = %result.algorithm,
            total_time = result.total_time,
            context_switches = result.context_switches,
            avg_waiting_time = result.avg_waiting_time,
            "Simulation complete"
        );
        Ok(result)
    }
}
