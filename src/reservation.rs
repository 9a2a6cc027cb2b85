//! Reservation records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates::StayRange;
use crate::room::RoomId;

/// Identifier of a reservation.
///
/// Stored reservations carry positive SQLite row ids. The booking planner
/// uses negative ids for placements that exist only inside a plan and have
/// not been written yet; those never escape to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReservationId(pub i64);

impl ReservationId {
    /// The raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reservation: one guest occupying one room for a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    room: RoomId,
    stay: StayRange,
    guest: String,
}

impl Reservation {
    /// Creates a reservation record.
    #[must_use]
    pub fn new(id: ReservationId, room: RoomId, stay: StayRange, guest: impl Into<String>) -> Self {
        Self {
            id,
            room,
            stay,
            guest: guest.into(),
        }
    }

    /// The reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// The room currently assigned to this reservation.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        self.room
    }

    /// The stay dates.
    #[must_use]
    pub const fn stay(&self) -> StayRange {
        self.stay
    }

    /// The guest identifier (typically an email address).
    #[must_use]
    pub fn guest(&self) -> &str {
        &self.guest
    }

    /// Returns a copy of this reservation assigned to a different room.
    ///
    /// Used by the rearrangement planner when shuffling placements inside
    /// a working snapshot.
    #[must_use]
    pub fn with_room(&self, room: RoomId) -> Self {
        Self {
            room,
            ..self.clone()
        }
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reservation {} for {} in room {} over {}",
            self.id, self.guest, self.room, self.stay
        )
    }
}
