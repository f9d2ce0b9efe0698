/*!
 * Shortest Remaining Time First
 *
 * Event driven: the running process advances to the next arrival or its own
 * completion, whichever comes first. At every arrival the best ready process
 * preempts only with strictly less remaining time.
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
    let mut running: Option<usize> = None;

    loop {
        arrivals.admit_due(policy, table, ready, clock);

        if let (Some(current), Some(best)) = (running, policy.select_next(ready, table)) {
            if table[best].remaining_time < table[current].remaining_time {
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
                        clock.idle_until(next);
                        continue;
                    }
                    None => break,
                },
            },
        };

        let remaining = table[current].remaining_time;
        let slice = match arrivals.next_arrival(table) {
            Some(next) if next < clock.now() + remaining => next - clock.now(),
            _ => remaining,
        };

        clock.run(&mut table[current], slice);
        if table[current].is_terminated() {
            running = None;
        }
    }
}
