/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Simulated time in milliseconds since the start of a run
pub type SimTime = u64;

/// Priority level (lower value is more urgent)
pub type Priority = i32;

/// Common result type for simulator operations
pub type SchedResult<T> = Result<T, super::errors::SimError>;
