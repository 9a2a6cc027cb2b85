//! The booking operation.
//!
//! Admits a multi-room-type request atomically: every requested room is
//! placed, or nothing is written at all. Placement is planned over an
//! in-memory working snapshot under the scope locks and only then applied
//! to the database in a single transaction.

use std::collections::HashMap;

use crate::allocation::inventory::free_rooms;
use crate::allocation::partition::plan_rearrangement;
use crate::allocation::scorer::choose_best_room;
use crate::booking::{BookingOutcome, BookingRequest};
use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::lock::ScopeRegistry;
use crate::reservation::{Reservation, ReservationId};
use crate::room::{Room, RoomId, RoomTypeId};

use super::executor::PlanExecutor;
use super::plan::{OperationPlan, PlanAction};

/// Books rooms for a request, rearranging existing reservations when a
/// straightforward placement fails.
///
/// For each requested unit, in ascending room-type order:
///
/// 1. The free rooms of the type are computed against the working
///    snapshot (stored reservations plus placements planned so far).
/// 2. If any room is free, the preference scorer picks one.
/// 3. Otherwise the rearrangement planner tries to shuffle the type's
///    reservations so everyone fits; a feasible shuffle contributes move
///    actions, an infeasible one rejects the whole request.
///
/// Only when every unit has a placement does the accumulated plan run,
/// in one transaction. A rejected request writes nothing, including
/// requests that fail on a later room type after successfully planning
/// an earlier one.
///
/// Business rejections are returned as data: an unknown hotel or room
/// type yields [`crate::BookingStatus::InvalidRequest`] and an
/// unsatisfiable request yields
/// [`crate::BookingStatus::InsufficientInventory`].
///
/// # Errors
///
/// Returns an error if a scope lock times out ([`Error::ScopeTimeout`],
/// retryable) or if a database query or write fails.
pub fn reserve(
    db: &mut Database,
    scopes: &ScopeRegistry,
    config: &Config,
    request: &BookingRequest,
) -> Result<BookingOutcome> {
    if !db.hotel_exists(request.hotel)? {
        return Ok(BookingOutcome::invalid_request(format!(
            "unknown hotel {}",
            request.hotel
        )));
    }

    let involved = request.involved_types();
    for room_type in &involved {
        if !db.room_type_exists(*room_type)? {
            return Ok(BookingOutcome::invalid_request(format!(
                "unknown room type {room_type}"
            )));
        }
    }

    if involved.is_empty() {
        return Ok(BookingOutcome::success(Vec::new()));
    }

    let _guards = scopes.acquire_many(request.hotel, &involved, config.scope_timeout())?;

    let mut planner = UnitPlanner::new(request, config.score_margin_days());
    for room_type in involved {
        let rooms = db.list_rooms(request.hotel, room_type)?;
        let stored = db.list_reservations(request.hotel, room_type)?;
        let quantity = request.rooms.get(&room_type).copied().unwrap_or(0);

        if let Some(outcome) = planner.place_units(room_type, &rooms, stored, quantity)? {
            return Ok(outcome);
        }
    }

    let mut plan = OperationPlan::new(format!(
        "Book {} room(s) at hotel {} over {}",
        request.total_rooms(),
        request.hotel,
        request.stay
    ));
    for action in planner.into_actions() {
        plan = plan.add_action(action);
    }

    let mut executor = PlanExecutor::new(db);
    let result = executor.execute(&plan)?;

    log::debug!(
        "booked {} reservation(s) at hotel {}",
        result.created.len(),
        request.hotel
    );
    Ok(BookingOutcome::success(result.created))
}

/// Accumulates planned placements across room types.
///
/// Placements that are not written yet are represented in the working
/// snapshot as reservations with negative ids, so a later rescue within
/// the same room type can move them by rewriting their pending create
/// action instead of emitting a reassign.
struct UnitPlanner<'a> {
    request: &'a BookingRequest,
    margin_days: i64,
    actions: Vec<PlanAction>,
    pending_action_index: HashMap<ReservationId, usize>,
    next_pending: i64,
}

impl<'a> UnitPlanner<'a> {
    fn new(request: &'a BookingRequest, margin_days: i64) -> Self {
        Self {
            request,
            margin_days,
            actions: Vec::new(),
            pending_action_index: HashMap::new(),
            next_pending: -1,
        }
    }

    fn into_actions(self) -> Vec<PlanAction> {
        self.actions
    }

    /// Plans `quantity` placements for one room type.
    ///
    /// Returns `Ok(Some(outcome))` when the request must be rejected.
    fn place_units(
        &mut self,
        room_type: RoomTypeId,
        rooms: &[Room],
        mut working: Vec<Reservation>,
        quantity: u32,
    ) -> Result<Option<BookingOutcome>> {
        for _ in 0..quantity {
            let free = free_rooms(rooms, &working, &self.request.stay);
            let room = if free.is_empty() {
                match self.rescue(rooms, &mut working)? {
                    Some(room) => room,
                    None => {
                        log::debug!(
                            "insufficient inventory for room type {room_type} over {}",
                            self.request.stay
                        );
                        return Ok(Some(BookingOutcome::insufficient_inventory(format!(
                            "no placement for room type {room_type} over {}",
                            self.request.stay
                        ))));
                    }
                }
            } else {
                choose_best_room(&free, &working, &self.request.stay, self.margin_days)?.id
            };

            self.push_placement(room, &mut working);
        }
        Ok(None)
    }

    /// Runs the rearrangement planner over the working snapshot and folds
    /// the resulting moves into the accumulated actions.
    ///
    /// Returns the room planned for the new stay, or `None` when the
    /// snapshot cannot absorb it.
    fn rescue(
        &mut self,
        rooms: &[Room],
        working: &mut Vec<Reservation>,
    ) -> Result<Option<RoomId>> {
        let Some(assignments) = plan_rearrangement(rooms, working, &self.request.stay) else {
            return Ok(None);
        };

        let mut new_room = None;
        for assignment in assignments {
            match assignment.reservation {
                Some(id) => {
                    if id.value() < 0 {
                        // A placement from this same plan: move it by
                        // rewriting its pending create action.
                        let index =
                            *self
                                .pending_action_index
                                .get(&id)
                                .ok_or_else(|| Error::Validation {
                                    field: "rearrangement".into(),
                                    message: format!("unknown pending placement {id}"),
                                })?;
                        if let PlanAction::CreateReservation { room, .. } =
                            &mut self.actions[index]
                        {
                            *room = assignment.room;
                        }
                    } else {
                        self.actions.push(PlanAction::ReassignRoom {
                            reservation: id,
                            room: assignment.room,
                        });
                    }
                    if let Some(entry) = working.iter_mut().find(|r| r.id() == id) {
                        *entry = entry.with_room(assignment.room);
                    }
                }
                None => new_room = Some(assignment.room),
            }
        }

        new_room.map_or_else(
            || {
                Err(Error::Validation {
                    field: "rearrangement".into(),
                    message: "plan is missing a placement for the new stay".into(),
                })
            },
            |room| Ok(Some(room)),
        )
    }

    /// Records one planned placement in the actions and the working
    /// snapshot.
    fn push_placement(&mut self, room: RoomId, working: &mut Vec<Reservation>) {
        let pending_id = ReservationId(self.next_pending);
        self.next_pending -= 1;

        self.pending_action_index
            .insert(pending_id, self.actions.len());
        self.actions.push(PlanAction::CreateReservation {
            room,
            stay: self.request.stay,
            guest: self.request.guest.clone(),
        });
        working.push(Reservation::new(
            pending_id,
            room,
            self.request.stay,
            self.request.guest.clone(),
        ));
    }
}
