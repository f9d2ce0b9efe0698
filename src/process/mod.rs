/*!
 * Process Module
 * Process entity, lifecycle transitions and workload validation
 */

mod lifecycle;
pub mod types;
pub mod validation;

pub use types::{Process, ProcessState};
pub use validation::validate_workload;
