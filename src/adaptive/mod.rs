/*!
 * Adaptive Module
 * Workload analysis and advisory policy selection
 */

pub mod analysis;
pub mod estimator;
pub mod selector;

pub use analysis::WorkloadAnalysis;
pub use estimator::{estimate_wait, rank, PolicyEstimate};
pub use selector::{suggested_quantum, AdaptiveSelector, Recommendation};
