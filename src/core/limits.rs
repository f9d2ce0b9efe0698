/*!
 * Simulator Limits and Constants
 *
 * Default policy parameters and adaptive selector thresholds.
 * Grouped by domain so tuning happens in one place.
 */

use super::types::SimTime;

// =============================================================================
// ROUND ROBIN
// =============================================================================

/// Default Round Robin quantum (10ms)
pub const DEFAULT_TIME_QUANTUM: SimTime = 10;

/// Quantum used for Round Robin when every policy is compared side by side
pub const COMPARE_TIME_QUANTUM: SimTime = 20;

// =============================================================================
// PRIORITY WITH AGING
// =============================================================================

/// Simulated time between two aging steps (50ms)
pub const DEFAULT_AGING_INTERVAL: SimTime = 50;

/// Effective-priority gain per aging step
pub const DEFAULT_AGING_AMOUNT: i32 = 1;

// =============================================================================
// MLFQ
// =============================================================================

/// Per-level quanta; `None` runs to completion (FCFS)
pub const DEFAULT_MLFQ_QUANTA: [Option<SimTime>; 3] = [Some(8), Some(16), None];

/// Interval of the global priority boost (500ms)
pub const DEFAULT_BOOST_INTERVAL: SimTime = 500;

// =============================================================================
// ADAPTIVE SELECTOR
// =============================================================================

/// Bounds and divisor for the suggested Round Robin quantum
pub const MIN_SUGGESTED_QUANTUM: SimTime = 10;
pub const MAX_SUGGESTED_QUANTUM: SimTime = 50;
pub const QUANTUM_DIVISOR: f64 = 5.0;

/// Interactive: short bursts and a noticeable share of I/O-bound processes
pub const INTERACTIVE_MAX_AVG_BURST: f64 = 50.0;
pub const INTERACTIVE_MIN_IO_RATIO: f64 = 0.3;

/// Batch: long bursts, mostly CPU-bound
pub const BATCH_MIN_AVG_BURST: f64 = 100.0;
pub const BATCH_MAX_IO_RATIO: f64 = 0.2;

/// I/O-heavy regardless of burst length
pub const IO_HEAVY_RATIO: f64 = 0.5;

/// Priority variants are preferred only when priorities are clearly spread
pub const PRIORITY_VARIANCE_THRESHOLD: f64 = 6.0;
pub const PRIORITY_RANGE_THRESHOLD: i64 = 7;

/// Number of best-ranked policies the override rules may choose from
pub const TOP_RANKED_SUBSET: usize = 4;
