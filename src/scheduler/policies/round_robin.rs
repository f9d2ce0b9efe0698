/*!
 * Round Robin
 *
 * Circular queue with a fixed quantum. A process that does not finish its slice
 * goes to the tail after every process that arrived during that slice.
 */

use crate::process::Process;
use crate::scheduler::clock::SimClock;
use crate::scheduler::queue::{ArrivalStream, ReadyQueue};
use crate::scheduler::traits::Scheduler;
use crate::scheduler::types::TimeQuantum;

pub(super) fn run(
    policy: &impl Scheduler,
    quantum: TimeQuantum,
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
        clock.dispatch(&mut table[idx]);
        let slice = quantum.as_millis().min(table[idx].remaining_time);
        clock.run(&mut table[idx], slice);

        // Newcomers first, then the preempted process
        arrivals.admit_due(policy, table, ready, clock);
        if !table[idx].is_terminated() {
            ready.requeue(idx, 0, table, clock);
        }
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
    fn test_quantum_five() {
        let set = vec![
            Process::new(1, "P1", 10),
            Process::new(2, "P2", 4),
            Process::new(3, "P3", 7),
        ];
        let result = SchedulingPolicy::round_robin(5)
            .unwrap()
            .schedule(&set)
            .unwrap();

        assert_eq!(
            result.gantt_chart,
            vec![
                entry(1, 0, 5),
                entry(2, 5, 9),
                entry(3, 9, 14),
                entry(1, 14, 19),
                entry(3, 19, 21),
            ]
        );
        assert!((result.avg_waiting_time - 28.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.algorithm, "Round Robin (q=5)");
    }

    #[test]
    fn test_arrivals_during_slice_go_before_preempted() {
        let set = vec![
            Process::new(1, "a", 6),
            Process::new(2, "b", 2),
            Process::new(3, "c", 2).with_arrival(3),
        ];
        let result = SchedulingPolicy::round_robin(3)
            .unwrap()
            .schedule(&set)
            .unwrap();
        // a runs 0-3; c arrived at 3 and queues behind b, then a
        let order: Vec<_> = result.gantt_chart.iter().map(|e| e.pid).collect();
        assert_eq!(order, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_lone_process_is_not_a_context_switch() {
        let set = vec![Process::new(1, "solo", 12)];
        let result = SchedulingPolicy::round_robin(4)
            .unwrap()
            .schedule(&set)
            .unwrap();
        assert_eq!(result.gantt_chart, vec![entry(1, 0, 12)]);
        assert_eq!(result.context_switches, 0);
    }
}
