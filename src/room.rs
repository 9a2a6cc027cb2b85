//! Hotel, room type and room records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HotelId(pub i64);

/// Identifier of a room type (category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomTypeId(pub i64);

/// Identifier of a physical room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub i64);

impl HotelId {
    /// The raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl RoomTypeId {
    /// The raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl RoomId {
    /// The raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RoomTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A room category, such as "standard double" or "suite".
///
/// Names are unique across the database; bookings reference types by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    /// Identifier of the type.
    pub id: RoomTypeId,
    /// Unique human-readable name.
    pub name: String,
}

/// A physical room belonging to a hotel.
///
/// The room number is unique within its hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Identifier of the room.
    pub id: RoomId,
    /// Hotel the room belongs to.
    pub hotel: HotelId,
    /// Category of the room.
    pub room_type: RoomTypeId,
    /// Door number, unique per hotel.
    pub number: u32,
}
