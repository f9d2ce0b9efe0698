/*!
 * Preemptive Priority with Aging
 *
 * Effective priority is the base priority minus the aging counter. Every aging
 * interval each waiting process gains `amount` on its counter until it outranks
 * the running process. Decisions happen at arrivals, aging boundaries and
 * completions; the running process is replaced whenever a ready process has a
 * smaller selection key. The counter saturates, so a huge aging amount pins a
 * waiting process at the most urgent priority instead of wrapping.
 */

use crate::process::Process;
use crate::scheduler::clock::{EventKind, SimClock};
use crate::scheduler::queue::{ArrivalStream, ReadyQueue};
use crate::scheduler::traits::Scheduler;
use crate::scheduler::types::{AgingConfig, SchedulingPolicy};

pub(super) fn run(
    policy: &SchedulingPolicy,
    config: &AgingConfig,
    table: &mut [Process],
    ready: &mut ReadyQueue,
    clock: &mut SimClock,
) {
    let mut arrivals = ArrivalStream::new(table);
    let mut running: Option<usize> = None;
    let mut last_aging = clock.now();

    loop {
        // Age before admitting so a process arriving right now has not waited yet
        if clock.now() - last_aging >= config.interval() {
            apply_aging(config, ready, table, clock);
            last_aging = clock.now();
        }
        arrivals.admit_due(policy, table, ready, clock);

        if let (Some(current), Some(best)) = (running, policy.select_next(ready, table)) {
            if policy.selection_key(&table[best]) < policy.selection_key(&table[current]) {
                ready.requeue(current, 0, table, clock);
                running = None;
            }
        }

        let current = match running {
            Some(current) => current,
            None => match policy.select_next(ready, table) {
                Some(next) => {
                    ready.remove(next);
                    clock.dispatch(&mut table[next]);
                    running = Some(next);
                    next
                }
                None => match arrivals.next_arrival(table) {
                    Some(next) => {
                        // Nobody waits while the CPU is idle
                        clock.idle_until(next);
                        last_aging = next;
                        continue;
                    }
                    None => break,
                },
            },
        };

        let now = clock.now();
        let mut next_event = now + table[current].remaining_time;
        next_event = next_event.min(last_aging.saturating_add(config.interval()));
        if let Some(next) = arrivals.next_arrival(table) {
            next_event = next_event.min(next);
        }

        clock.run(&mut table[current], next_event - now);
        if table[current].is_terminated() {
            running = None;
        }
    }
}

/// One aging step for every process waiting in the ready queue
fn apply_aging(config: &AgingConfig, ready: &ReadyQueue, table: &mut [Process], clock: &mut SimClock) {
    let waiting: Vec<usize> = ready.iter().collect();
    for idx in waiting {
        let process = &mut table[idx];
        process.aging_counter = process.aging_counter.saturating_add(config.amount());
        let effective_priority = process.effective_priority();
        clock.log(Some(process.pid), EventKind::Aged { effective_priority });
    }
}
