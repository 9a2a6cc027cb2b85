//! Booking operations: plan, execute, and the public entry points.
//!
//! Operations follow a plan/execute split. The planning phase holds the
//! relevant scope locks, reads a snapshot, and produces an
//! [`OperationPlan`] describing every write; the [`PlanExecutor`] then
//! applies the plan in one transaction. Requests that cannot be admitted
//! never produce a plan, so they never write.

pub mod cancel;
pub mod executor;
pub mod plan;
pub mod rearrange;
pub mod reserve;

pub use cancel::cancel;
pub use executor::{ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction};
pub use rearrange::rearrange;
pub use reserve::reserve;
