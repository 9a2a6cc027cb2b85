//! Free-room filtering over inventory snapshots.

use crate::dates::StayRange;
use crate::reservation::Reservation;
use crate::room::Room;

/// Returns the rooms that can take the given stay.
///
/// A room qualifies when none of its reservations block the stay under
/// [`StayRange::conflicts_with`]. Input order is preserved, so callers
/// that pass rooms ordered by id get candidates ordered by id.
#[must_use]
pub fn free_rooms(rooms: &[Room], reservations: &[Reservation], stay: &StayRange) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| {
            !reservations
                .iter()
                .any(|r| r.room() == room.id && stay.conflicts_with(&r.stay()))
        })
        .copied()
        .collect()
}
