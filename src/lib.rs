//! payload-planner core
//!
//! Splits an ordered sequence of payloads into consecutive service periods
//! under a per-period resource budget, at minimum total cost.

pub mod traits;
pub mod error;
pub mod euclidean;
pub mod usage;
pub mod cost;
pub mod partition;
pub mod schedule;
pub mod solver;

pub use error::{ConfigurationError, PlannerError, ProvisioningError};
pub use solver::{solve, DeliveryPlanner, PlanResult, PlannerInput, SolveOptions};
