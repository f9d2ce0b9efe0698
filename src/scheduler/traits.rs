/*!
 * Scheduler Contract
 * Interface every scheduling policy implements
 */

use super::clock::SimClock;
use super::queue::ReadyQueue;
use super::result::SchedulingResult;
use crate::core::types::SchedResult;
use crate::process::Process;

/// Common scheduler contract
pub trait Scheduler {
    /// Display name used in results and reports
    fn name(&self) -> String;

    /// Enqueue an arrived process (idempotent, sets it Ready)
    fn admit(&self, ready: &mut ReadyQueue, idx: usize, table: &mut [Process], clock: &mut SimClock) -> bool {
        ready.admit(idx, table, clock)
    }

    /// Pick the process to run next; pure, never mutates the queue
    fn select_next(&self, ready: &ReadyQueue, table: &[Process]) -> Option<usize>;

    /// Run the whole process set to completion on fresh copies
    fn schedule(&self, processes: &[Process]) -> SchedResult<SchedulingResult>;
}
