/*!
 * Workload Validation
 * Reject malformed process sets before a simulation starts
 */

use super::types::Process;
use crate::core::errors::WorkloadError;
use crate::core::types::SimTime;
use ahash::AHashSet;

/// Validate a process set: unique pids, positive burst times, a representable timeline
///
/// No run can end later than the latest arrival plus the total burst, so that sum
/// must fit in `SimTime`. An empty set is valid.
pub fn validate_workload(processes: &[Process]) -> Result<(), WorkloadError> {
    let mut seen = AHashSet::with_capacity(processes.len());
    let mut total_burst: SimTime = 0;
    let mut latest: Option<&Process> = None;

    for process in processes {
        if !seen.insert(process.pid) {
            return Err(WorkloadError::DuplicatePid(process.pid));
        }
        if process.burst_time == 0 {
            return Err(WorkloadError::ZeroBurst(process.pid));
        }
        total_burst = total_burst
            .checked_add(process.burst_time)
            .ok_or(WorkloadError::TimeOverflow(process.pid))?;
        if latest.map_or(true, |l| process.arrival_time > l.arrival_time) {
            latest = Some(process);
        }
    }

    if let Some(latest) = latest {
        latest
            .arrival_time
            .checked_add(total_burst)
            .ok_or(WorkloadError::TimeOverflow(latest.pid))?;
    }

    Ok(())
}
