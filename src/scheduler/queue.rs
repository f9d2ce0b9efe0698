/*!
 * Ready Queue Service
 *
 * Shared bookkeeping for every policy: a multi-level ready queue of indices into the
 * run's process table, plus the arrival stream that admits processes as simulated
 * time reaches them. Single-level policies use level 0 only.
 */

use super::clock::{EventKind, SimClock};
use super::traits::Scheduler;
use crate::core::types::SimTime;
use crate::process::{Process, ProcessState};
use std::collections::VecDeque;

/// Ready queue, one FIFO per level
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    levels: Vec<VecDeque<usize>>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::with_levels(1)
    }

    pub fn with_levels(levels: usize) -> Self {
        assert!(levels > 0, "ready queue needs at least one level");
        Self {
            levels: vec![VecDeque::new(); levels],
        }
    }

    /// Enqueue a newly arrived process at level 0 (New → Ready)
    ///
    /// Admitting a process that is already queued is a no-op; returns whether it
    /// was enqueued.
    pub fn admit(&mut self, idx: usize, table: &mut [Process], clock: &mut SimClock) -> bool {
        if self.contains(idx) || table[idx].state != ProcessState::New {
            return false;
        }
        let process = &mut table[idx];
        process.admit(clock.now());
        process.queue_level = 0;
        self.levels[0].push_back(idx);
        clock.log(Some(process.pid), EventKind::Arrived);
        true
    }

    /// Return a preempted process to the tail of `level` (Running → Ready)
    pub fn requeue(
        &mut self,
        idx: usize,
        level: usize,
        table: &mut [Process],
        clock: &mut SimClock,
    ) {
        let level = level.min(self.levels.len() - 1);
        let process = &mut table[idx];
        process.preempt();
        process.queue_level = level;
        self.levels[level].push_back(idx);
        clock.log(Some(process.pid), EventKind::Preempted);
    }

    #[inline]
    pub fn front(&self, level: usize) -> Option<usize> {
        self.levels.get(level).and_then(|queue| queue.front().copied())
    }

    /// Remove `idx` wherever it is queued
    pub fn remove(&mut self, idx: usize) -> bool {
        for queue in &mut self.levels {
            if let Some(pos) = queue.iter().position(|&i| i == idx) {
                queue.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.levels.iter().any(|queue| queue.contains(&idx))
    }

    /// Lowest-numbered non-empty level
    pub fn highest_ready_level(&self) -> Option<usize> {
        self.levels.iter().position(|queue| !queue.is_empty())
    }

    /// Indices of every ready process, level by level in queue order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels.iter().flat_map(|queue| queue.iter().copied())
    }

    /// Move every queued process to level 0, keeping level-then-queue order
    pub fn boost(&mut self, table: &mut [Process]) {
        let (top, rest) = self.levels.split_at_mut(1);
        for queue in rest {
            top[0].extend(queue.drain(..));
        }
        for &idx in &top[0] {
            table[idx].queue_level = 0;
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(VecDeque::is_empty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.levels.iter().map(VecDeque::len).sum()
    }

    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

impl Default for ReadyQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Processes not yet admitted, in (arrival_time, pid) order
#[derive(Debug)]
pub struct ArrivalStream {
    order: Vec<usize>,
    cursor: usize,
}

impl ArrivalStream {
    pub fn new(table: &[Process]) -> Self {
        let mut order: Vec<usize> = (0..table.len()).collect();
        order.sort_by_key(|&idx| (table[idx].arrival_time, table[idx].pid));
        Self { order, cursor: 0 }
    }

    /// Arrival time of the next process still to arrive
    pub fn next_arrival(&self, table: &[Process]) -> Option<SimTime> {
        self.order
            .get(self.cursor)
            .map(|&idx| table[idx].arrival_time)
    }

    /// Admit every process whose arrival time has been reached, through `policy`
    pub fn admit_due<S: Scheduler + ?Sized>(
        &mut self,
        policy: &S,
        table: &mut [Process],
        ready: &mut ReadyQueue,
        clock: &mut SimClock,
    ) -> usize {
        let mut admitted = 0;
        while let Some(&idx) = self.order.get(self.cursor) {
            if table[idx].arrival_time > clock.now() {
                break;
            }
            self.cursor += 1;
            if policy.admit(ready, idx, table, clock) {
                admitted += 1;
            }
        }
        admitted
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SchedResult;
    use crate::scheduler::{SchedulingPolicy, SchedulingResult};
    use std::cell::Cell;

    fn table() -> Vec<Process> {
        vec![
            Process::new(3, "c", 5).with_arrival(4),
            Process::new(1, "a", 5).with_arrival(0),
            Process::new(2, "b", 5).with_arrival(0),
        ]
    }

    #[test]
    fn test_arrivals_in_time_then_pid_order() {
        let mut table = table();
        let mut ready = ReadyQueue::new();
        let mut clock = SimClock::new();
        let mut arrivals = ArrivalStream::new(&table);

        assert_eq!(arrivals.admit_due(&SchedulingPolicy::Fcfs, &mut table, &mut ready, &mut clock), 2);
        let pids: Vec<_> = ready.iter().map(|i| table[i].pid).collect();
        assert_eq!(pids, vec![1, 2]);
        assert_eq!(arrivals.next_arrival(&table), Some(4));

        clock.idle_until(4);
        assert_eq!(arrivals.admit_due(&SchedulingPolicy::Fcfs, &mut table, &mut ready, &mut clock), 1);
        assert!(arrivals.is_exhausted());
        assert_eq!(arrivals.next_arrival(&table), None);
    }

    #[test]
    fn test_admit_is_idempotent() {
        let mut table = table();
        let mut ready = ReadyQueue::new();
        let mut clock = SimClock::new();

        assert!(ready.admit(1, &mut table, &mut clock));
        assert!(!ready.admit(1, &mut table, &mut clock));
        assert_eq!(ready.len(), 1);
        assert_eq!(table[1].state, ProcessState::Ready);
    }

    #[test]
    fn test_boost_moves_everything_to_top_level() {
        let mut table = table();
        let mut ready = ReadyQueue::with_levels(3);
        let mut clock = SimClock::new();
        clock.idle_until(4);
        for idx in 0..3 {
            ready.admit(idx, &mut table, &mut clock);
        }
        // Move two processes down by hand
        ready.remove(0);
        ready.levels[2].push_back(0);
        table[0].queue_level = 2;
        ready.remove(1);
        ready.levels[1].push_back(1);
        table[1].queue_level = 1;

        assert_eq!(ready.highest_ready_level(), Some(0));
        ready.boost(&mut table);

        let order: Vec<_> = ready.iter().collect();
        assert_eq!(order, vec![2, 1, 0]);
        assert!(table.iter().all(|p| p.queue_level == 0));
        assert_eq!(ready.level_count(), 3);
    }

    /// Admits through the default hook and counts how often it is asked
    struct CountingAdmit(Cell<usize>);

    impl Scheduler for CountingAdmit {
        fn name(&self) -> String {
            "counting".to_string()
        }

        fn admit(&self, ready: &mut ReadyQueue, idx: usize, table: &mut [Process], clock: &mut SimClock) -> bool {
            self.0.set(self.0.get() + 1);
            ready.admit(idx, table, clock)
        }

        fn select_next(&self, ready: &ReadyQueue, _table: &[Process]) -> Option<usize> {
            ready.front(0)
        }

        fn schedule(&self, _processes: &[Process]) -> SchedResult<SchedulingResult> {
            unreachable!("admission only")
        }
    }

    #[test]
    fn test_arrivals_go_through_policy_admit() {
        let mut table = table();
        let mut ready = ReadyQueue::new();
        let mut clock = SimClock::new();
        let mut arrivals = ArrivalStream::new(&table);
        let policy = CountingAdmit(Cell::new(0));

        assert_eq!(arrivals.admit_due(&policy, &mut table, &mut ready, &mut clock), 2);
        assert_eq!(policy.0.get(), 2);
        clock.idle_until(4);
        arrivals.admit_due(&policy, &mut table, &mut ready, &mut clock);
        assert_eq!(policy.0.get(), 3);
        assert_eq!(ready.len(), 3);
    }
}
