/*!
 * Non-Preemptive Family
 * FCFS, SJF and Priority: pick by key, run to completion, re-evaluate
 */

use crate::process::Process;
use crate::scheduler::clock::SimClock;
use crate::scheduler::queue::{ArrivalStream, ReadyQueue};
use crate::scheduler::traits::Scheduler;

pub(super) fn run(
    policy: &impl Scheduler,
    table: &mut [Process],
    ready: &mut ReadyQueue,
    clock: &mut SimClock,
) {
    let mut arrivals = ArrivalStream::new(table);

    loop {
        arrivals.admit_due(policy, table, ready, clock);

        let Some(idx) = policy.select_next(ready, table) else {
            match arrivals.next_arrival(table) {
                Some(next) => {
                    clock.idle_until(next);
                    continue;
                }
                None => break,
            }
        };

        ready.remove(idx);
        let process = &mut table[idx];
        clock.dispatch(process);
        let burst = process.remaining_time;
        clock.run(process, burst);
    }
}

#[cfg(test)]
mod tests {
    use crate::process::Process;
    use crate::scheduler::{GanttEntry, Scheduler, SchedulingPolicy};

    fn entry(pid: u32, start_time: u64, end_time: u64) -> GanttEntry {
        GanttEntry {
            pid,
            start_time,
            end_time,
        }
    }

    #[test]
    fn test_fcfs_convoy() {
        let set = vec![
            Process::new(1, "P1", 24),
            Process::new(2, "P2", 3),
            Process::new(3, "P3", 3),
        ];
        let result = SchedulingPolicy::Fcfs.schedule(&set).unwrap();

        assert_eq!(
            result.gantt_chart,
            vec![entry(1, 0, 24), entry(2, 24, 27), entry(3, 27, 30)]
        );
        assert!((result.avg_waiting_time - 17.0).abs() < 1e-9);
        assert_eq!(result.context_switches, 2);
    }

    #[test]
    fn test_sjf_late_short_job_does_not_preempt() {
        let set = vec![
            Process::new(1, "long", 10),
            Process::new(2, "short", 1).with_arrival(1),
        ];
        let result = SchedulingPolicy::Sjf.schedule(&set).unwrap();
        assert_eq!(result.gantt_chart, vec![entry(1, 0, 10), entry(2, 10, 11)]);
    }

    #[test]
    fn test_priority_ties_break_on_arrival_then_pid() {
        let set = vec![
            Process::new(4, "d", 2).with_priority(1),
            Process::new(2, "b", 2).with_priority(1),
            Process::new(3, "c", 2).with_priority(0).with_arrival(1),
            Process::new(1, "a", 2).with_priority(3),
        ];
        let result = SchedulingPolicy::Priority.schedule(&set).unwrap();
        let order: Vec<_> = result.gantt_chart.iter().map(|e| e.pid).collect();
        assert_eq!(order, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_idle_gap_jumps_to_next_arrival() {
        let set = vec![
            Process::new(1, "a", 2).with_arrival(3),
            Process::new(2, "b", 2).with_arrival(10),
        ];
        let result = SchedulingPolicy::Fcfs.schedule(&set).unwrap();
        assert_eq!(result.gantt_chart, vec![entry(1, 3, 5), entry(2, 10, 12)]);
        assert_eq!(result.total_time, 12);
    }
}
