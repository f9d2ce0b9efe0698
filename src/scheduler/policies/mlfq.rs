/*!
 * Multi-Level Feedback Queue
 *
 * Level 0 is the highest. New arrivals enter level 0, a process that uses its
 * whole quantum drops one level, and a periodic boost returns everyone to the
 * top so long jobs cannot starve. An arrival cuts short a slice below level 0
 * (and at level 0 when top-level preemption is enabled).
 */

use crate::core::types::SimTime;
use crate::process::Process;
use crate::scheduler::clock::{EventKind, SimClock};
use crate::scheduler::queue::{ArrivalStream, ReadyQueue};
use crate::scheduler::traits::Scheduler;
use crate::scheduler::types::{MlfqConfig, SchedulingPolicy};
use tracing::trace;

pub(super) fn run(
    policy: &SchedulingPolicy,
    config: &MlfqConfig,
    table: &mut [Process],
    ready: &mut ReadyQueue,
    clock: &mut SimClock,
) {
    let mut arrivals = ArrivalStream::new(table);
    let mut last_boost = clock.now();
    let last_level = config.levels() - 1;

    loop {
        if clock.now() - last_boost >= config.boost_interval() {
            if !ready.is_empty() {
                clock.log(None, EventKind::PriorityBoost);
                ready.boost(table);
            }
            last_boost = clock.now();
        }
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

        let level = table[idx].queue_level;
        let quantum = config.quantum(level);
        let slice = slice_length(config, level, quantum, &table[idx], &arrivals, table, clock.now());
        trace!(pid = table[idx].pid, level, slice, "mlfq slice");
        clock.run(&mut table[idx], slice);

        // Newcomers land at level 0 before the current process is requeued
        arrivals.admit_due(policy, table, ready, clock);
        if table[idx].is_terminated() {
            continue;
        }

        match quantum {
            Some(quantum) if slice >= quantum && level < last_level => {
                ready.requeue(idx, level + 1, table, clock);
                clock.log(Some(table[idx].pid), EventKind::Demoted { level: level + 1 });
            }
            _ => ready.requeue(idx, level, table, clock),
        }
    }
}

/// Length of the next slice at `level`
fn slice_length(
    config: &MlfqConfig,
    level: usize,
    quantum: Option<SimTime>,
    process: &Process,
    arrivals: &ArrivalStream,
    table: &[Process],
    now: SimTime,
) -> SimTime {
    let mut slice = quantum.map_or(process.remaining_time, |q| q.min(process.remaining_time));
    if level > 0 || config.preempt_top_level() {
        if let Some(next) = arrivals.next_arrival(table) {
            if next > now && next < now + slice {
                slice = next - now;
            }
        }
    }
    slice
}

#[cfg(test)]
mod tests {
    use crate::process::Process;
    use crate::scheduler::clock::EventKind;
    use crate::scheduler::types::MlfqConfig;
    use crate::scheduler::{GanttEntry, Scheduler, SchedulingPolicy};

    fn entry(pid: u32, start_time: u64, end_time: u64) -> GanttEntry {
        GanttEntry {
            pid,
            start_time,
            end_time,
        }
    }

    #[test]
    fn test_lone_process_sinks_to_bottom_level() {
        let set = vec![Process::new(1, "batch", 30)];
        let result = SchedulingPolicy::Mlfq(MlfqConfig::default())
            .schedule(&set)
            .unwrap();

        assert_eq!(result.gantt_chart, vec![entry(1, 0, 30)]);
        assert_eq!(result.context_switches, 0);
        assert_eq!(result.process(1).unwrap().queue_level, 2);

        let demotions: Vec<_> = result
            .events
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Demoted { level } => Some((e.time, level)),
                _ => None,
            })
            .collect();
        assert_eq!(demotions, vec![(8, 1), (24, 2)]);
    }

    #[test]
    fn test_short_job_finishes_at_top_level() {
        let set = vec![Process::new(1, "long", 20), Process::new(2, "short", 4)];
        let result = SchedulingPolicy::Mlfq(MlfqConfig::default())
            .schedule(&set)
            .unwrap();
        assert_eq!(
            result.gantt_chart,
            vec![entry(1, 0, 8), entry(2, 8, 12), entry(1, 12, 24)]
        );
        assert_eq!(result.process(2).unwrap().queue_level, 0);
    }

    #[test]
    fn test_arrival_cuts_lower_level_slice() {
        let set = vec![
            Process::new(1, "long", 30),
            Process::new(2, "short", 2).with_arrival(10),
        ];
        let result = SchedulingPolicy::Mlfq(MlfqConfig::default())
            .schedule(&set)
            .unwrap();
        // Cut at 10 is not a full quantum, so "long" stays at level 1
        assert_eq!(
            result.gantt_chart,
            vec![entry(1, 0, 10), entry(2, 10, 12), entry(1, 12, 32)]
        );
        assert_eq!(result.process(1).unwrap().queue_level, 2);
    }

    #[test]
    fn test_top_level_preemption_is_opt_in() {
        let set = vec![
            Process::new(1, "a", 10),
            Process::new(2, "b", 2).with_arrival(3),
        ];

        let result = SchedulingPolicy::Mlfq(MlfqConfig::default())
            .schedule(&set)
            .unwrap();
        assert_eq!(
            result.gantt_chart,
            vec![entry(1, 0, 8), entry(2, 8, 10), entry(1, 10, 12)]
        );

        let config = MlfqConfig::default().with_top_level_preemption(true);
        let result = SchedulingPolicy::Mlfq(config).schedule(&set).unwrap();
        assert_eq!(
            result.gantt_chart,
            vec![entry(1, 0, 3), entry(2, 3, 5), entry(1, 5, 12)]
        );
    }

    #[test]
    fn test_boost_returns_everyone_to_top() {
        let set = vec![Process::new(1, "a", 100), Process::new(2, "b", 100)];
        let policy = SchedulingPolicy::mlfq(vec![Some(2), Some(4), None], 10).unwrap();
        let result = policy.schedule(&set).unwrap();

        assert_eq!(
            &result.gantt_chart[..6],
            &[
                entry(1, 0, 2),
                entry(2, 2, 4),
                entry(1, 4, 8),
                entry(2, 8, 12),
                entry(1, 12, 14),
                entry(2, 14, 16),
            ]
        );
        let first_boost = result
            .events
            .iter()
            .find(|e| e.kind == EventKind::PriorityBoost)
            .map(|e| e.time);
        assert_eq!(first_boost, Some(12));
        assert_eq!(result.total_time, 200);
    }
}
