//! The cancellation operation.

use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::lock::ScopeRegistry;
use crate::reservation::ReservationId;

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Cancels a reservation.
///
/// The delete runs under the (hotel, room type) scope lock of the
/// reservation's room, so it cannot interleave with a booking that is
/// counting on the reservation staying put. Returns `false` when the
/// reservation does not exist.
///
/// # Errors
///
/// Returns [`Error::ScopeTimeout`] if the scope cannot be acquired in
/// time, or a database error if a query or write fails.
pub fn cancel(
    db: &mut Database,
    scopes: &ScopeRegistry,
    config: &Config,
    id: ReservationId,
) -> Result<bool> {
    let Some(reservation) = db.get_reservation(id)? else {
        return Ok(false);
    };
    let Some(room) = db.get_room(reservation.room())? else {
        return Err(Error::NotFound {
            resource: format!("room {}", reservation.room()),
        });
    };

    let _guard = scopes.acquire(room.hotel, room.room_type, config.scope_timeout())?;

    let plan = OperationPlan::new(format!("Cancel reservation {id}"))
        .add_action(PlanAction::DeleteReservation(id));

    let mut executor = PlanExecutor::new(db);
    match executor.execute(&plan) {
        Ok(_) => Ok(true),
        // The reservation disappeared between lookup and lock.
        Err(err) if err.is_not_found() => Ok(false),
        Err(err) => Err(err),
    }
}
