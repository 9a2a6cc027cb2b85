//! Plan types for booking operations.
//!
//! This module defines the plan structures that describe what database
//! writes an operation will perform, without actually performing them.
//! Rejected bookings never produce a plan, which is how the all-or-
//! nothing guarantee falls out: nothing is written until a complete plan
//! exists.

use crate::dates::StayRange;
use crate::reservation::ReservationId;
use crate::room::RoomId;

/// A single write to be performed during plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Create a new reservation on the given room.
    CreateReservation {
        /// Room to reserve.
        room: RoomId,
        /// Stay dates.
        stay: StayRange,
        /// Guest identifier.
        guest: String,
    },

    /// Move an existing reservation to a different room.
    ReassignRoom {
        /// The reservation to move.
        reservation: ReservationId,
        /// Its new room.
        room: RoomId,
    },

    /// Delete a reservation.
    DeleteReservation(ReservationId),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation { room, stay, guest } => {
                format!("Create reservation for {guest} in room {room} over {stay}")
            }
            Self::ReassignRoom { reservation, room } => {
                format!("Move reservation {reservation} to room {room}")
            }
            Self::DeleteReservation(id) => {
                format!("Delete reservation {id}")
            }
        }
    }
}

/// A complete operation plan describing all writes to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of
/// actions, and any warnings that should be communicated to the caller.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the caller.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Book two doubles");
    /// assert_eq!(plan.description, "Book two doubles");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
