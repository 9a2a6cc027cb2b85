//! Plan execution engine.
//!
//! This module implements the executor that takes operation plans and
//! applies them to the database. All actions of a plan run inside one
//! IMMEDIATE transaction: either every write commits or none do.

use rusqlite::{Connection, TransactionBehavior};

use crate::database::operations::{
    create_reservation_in, delete_reservation_in, update_reservation_room_in,
};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::ReservationId;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
///
/// This struct provides information about what happened during execution,
/// including whether it was a dry run and what actions were taken.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in
    /// dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Ids of reservations created by the plan, in action order. Empty
    /// in dry-run mode.
    pub created: Vec<ReservationId>,
}

impl ExecutionResult {
    fn success(plan: &OperationPlan, created: Vec<ReservationId>) -> Self {
        Self {
            success: true,
            dry_run: false,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            created,
        }
    }

    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            dry_run: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            created: Vec::new(),
        }
    }
}

/// Executes operation plans against the database.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (reporting without changes).
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::{Database, DatabaseConfig};
/// use innkeep::operations::{OperationPlan, PlanExecutor};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let plan = OperationPlan::new("Empty plan");
///
/// let mut executor = PlanExecutor::new(&mut db);
/// let result = executor.execute(&plan).unwrap();
/// assert!(result.success);
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db, dry_run: false }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode, the executor reports the plan's actions but does
    /// not modify the database.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan atomically.
    ///
    /// All actions run inside one IMMEDIATE transaction. If any action
    /// fails, the transaction is rolled back and the action's error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns the failing action's error, or [`Error::RollbackFailed`]
    /// if the rollback after a failure did not complete; the latter is
    /// also logged at error level because the database then needs manual
    /// reconciliation.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::dry_run(plan));
        }

        log::debug!(
            "executing plan '{}' with {} action(s)",
            plan.description,
            plan.len()
        );

        let tx = self
            .db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut created = Vec::new();
        let mut failure: Option<Error> = None;
        for action in &plan.actions {
            match Self::apply(&tx, action) {
                Ok(Some(id)) => created.push(id),
                Ok(None) => {}
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        if let Some(err) = failure {
            if let Err(rollback_err) = tx.rollback() {
                log::error!(
                    "rollback failed after '{err}': {rollback_err}; manual reconciliation required"
                );
                return Err(Error::RollbackFailed {
                    details: rollback_err.to_string(),
                });
            }
            return Err(err);
        }

        tx.commit()?;
        Ok(ExecutionResult::success(plan, created))
    }

    /// Applies a single action on the transaction's connection.
    ///
    /// Returns the new id for create actions.
    fn apply(conn: &Connection, action: &PlanAction) -> Result<Option<ReservationId>> {
        match action {
            PlanAction::CreateReservation { room, stay, guest } => {
                let id = create_reservation_in(conn, *room, *stay, guest)?;
                Ok(Some(id))
            }
            PlanAction::ReassignRoom { reservation, room } => {
                if !update_reservation_room_in(conn, *reservation, *room)? {
                    return Err(Error::NotFound {
                        resource: format!("reservation {reservation}"),
                    });
                }
                Ok(None)
            }
            PlanAction::DeleteReservation(id) => {
                if !delete_reservation_in(conn, *id)? {
                    return Err(Error::NotFound {
                        resource: format!("reservation {id}"),
                    });
                }
                Ok(None)
            }
        }
    }
}
