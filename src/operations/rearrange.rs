//! The standalone rearrangement operation.
//!
//! Attempts to fit one new stay onto a room type by shuffling the type's
//! existing reservations, persisting the shuffle atomically when it is
//! feasible.

use crate::allocation::partition::plan_rearrangement;
use crate::config::Config;
use crate::database::Database;
use crate::dates::StayRange;
use crate::error::{Error, Result};
use crate::lock::ScopeRegistry;
use crate::room::{HotelId, RoomTypeId};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Rearranges the reservations of one room type to admit a new stay.
///
/// When the planner finds a feasible assignment, every existing
/// reservation is moved to its planned room (including those whose room
/// did not change) and the new reservation is created, all in one
/// transaction. Returns `true` on success and `false` when the stay
/// cannot fit; an infeasible stay writes nothing.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the hotel or room type does not exist,
/// [`Error::ScopeTimeout`] if the booking scope cannot be acquired in
/// time, or a database error if a query or write fails.
pub fn rearrange(
    db: &mut Database,
    scopes: &ScopeRegistry,
    config: &Config,
    hotel: HotelId,
    room_type: RoomTypeId,
    stay: StayRange,
    guest: &str,
) -> Result<bool> {
    if !db.hotel_exists(hotel)? {
        return Err(Error::NotFound {
            resource: format!("hotel {hotel}"),
        });
    }
    if !db.room_type_exists(room_type)? {
        return Err(Error::NotFound {
            resource: format!("room type {room_type}"),
        });
    }

    let _guard = scopes.acquire(hotel, room_type, config.scope_timeout())?;

    let rooms = db.list_rooms(hotel, room_type)?;
    let reservations = db.list_reservations(hotel, room_type)?;

    let Some(assignments) = plan_rearrangement(&rooms, &reservations, &stay) else {
        log::debug!("rearrangement infeasible for room type {room_type} over {stay}");
        return Ok(false);
    };

    let mut plan = OperationPlan::new(format!(
        "Rearrange room type {room_type} at hotel {hotel} to admit {stay}"
    ));
    for assignment in assignments {
        let action = match assignment.reservation {
            Some(id) => PlanAction::ReassignRoom {
                reservation: id,
                room: assignment.room,
            },
            None => PlanAction::CreateReservation {
                room: assignment.room,
                stay,
                guest: guest.to_string(),
            },
        };
        plan = plan.add_action(action);
    }

    let mut executor = PlanExecutor::new(db);
    executor.execute(&plan)?;
    Ok(true)
}
