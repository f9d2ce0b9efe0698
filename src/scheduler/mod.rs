/*!
 * Scheduler Module
 * Simulation engine: contract, ready queue, clock, policies and metrics
 */

pub mod clock;
pub mod compare;
pub mod policies;
pub mod queue;
pub mod result;
pub mod traits;
pub mod types;

// Re-export public API
pub use clock::{EventKind, GanttEntry, SimClock, SimEvent};
pub use compare::{compare_all, comparison_policies, Comparison, ComparisonRow};
pub use queue::{ArrivalStream, ReadyQueue};
pub use result::{ProcessMetrics, SchedulingResult};
pub use traits::Scheduler;
pub use types::{AgingConfig, MlfqConfig, SchedulingPolicy, TimeQuantum};
