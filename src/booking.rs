//! Booking requests and outcomes.
//!
//! A booking request asks for a number of rooms per room type at one hotel
//! over a single stay. The outcome reports either the created reservation
//! ids or why the request could not be admitted; business rejections are
//! data, not errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dates::StayRange;
use crate::reservation::ReservationId;
use crate::room::{HotelId, RoomTypeId};

/// A request to book rooms at one hotel over a single stay.
///
/// Quantities are held in a `BTreeMap` so that room types are always
/// processed in ascending id order, which keeps planning and lock
/// acquisition deterministic.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{BookingRequest, HotelId, RoomTypeId, StayRange};
///
/// let stay = StayRange::new(
///     NaiveDate::from_ymd_opt(2014, 7, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2014, 7, 4).unwrap(),
/// ).unwrap();
///
/// let request = BookingRequest::new(HotelId(1), stay, "guest@example.com")
///     .with_rooms(RoomTypeId(1), 2)
///     .with_rooms(RoomTypeId(2), 1);
///
/// assert_eq!(request.total_rooms(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Hotel the booking targets.
    pub hotel: HotelId,
    /// Stay dates shared by every requested room.
    pub stay: StayRange,
    /// Requested number of rooms per room type.
    pub rooms: BTreeMap<RoomTypeId, u32>,
    /// Guest identifier recorded on every created reservation.
    pub guest: String,
}

impl BookingRequest {
    /// Creates an empty request for the given hotel and stay.
    #[must_use]
    pub fn new(hotel: HotelId, stay: StayRange, guest: impl Into<String>) -> Self {
        Self {
            hotel,
            stay,
            rooms: BTreeMap::new(),
            guest: guest.into(),
        }
    }

    /// Sets the requested quantity for a room type.
    ///
    /// A quantity of zero is allowed and means the type is ignored.
    #[must_use]
    pub fn with_rooms(mut self, room_type: RoomTypeId, quantity: u32) -> Self {
        self.rooms.insert(room_type, quantity);
        self
    }

    /// Total number of rooms requested across all types.
    #[must_use]
    pub fn total_rooms(&self) -> u32 {
        self.rooms.values().sum()
    }

    /// The room types with a non-zero quantity, in ascending id order.
    #[must_use]
    pub fn involved_types(&self) -> Vec<RoomTypeId> {
        self.rooms
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(id, _)| *id)
            .collect()
    }
}

/// How a booking request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Every requested room was placed and persisted.
    Success,
    /// The request cannot fit, even after rearranging existing
    /// reservations. Nothing was written.
    InsufficientInventory,
    /// The request referenced an unknown hotel or room type. Nothing was
    /// written.
    InvalidRequest,
}

/// The result of a booking attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingOutcome {
    /// Resolution status.
    pub status: BookingStatus,
    /// Ids of the created reservations, in placement order. Empty unless
    /// the status is [`BookingStatus::Success`].
    pub reservations: Vec<ReservationId>,
    /// Human-readable detail for rejected requests.
    pub message: Option<String>,
}

impl BookingOutcome {
    /// A successful outcome carrying the created reservation ids.
    #[must_use]
    pub fn success(reservations: Vec<ReservationId>) -> Self {
        Self {
            status: BookingStatus::Success,
            reservations,
            message: None,
        }
    }

    /// The inventory cannot absorb the request.
    #[must_use]
    pub fn insufficient_inventory(message: impl Into<String>) -> Self {
        Self {
            status: BookingStatus::InsufficientInventory,
            reservations: Vec::new(),
            message: Some(message.into()),
        }
    }

    /// The request referenced unknown entities.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            status: BookingStatus::InvalidRequest,
            reservations: Vec::new(),
            message: Some(message.into()),
        }
    }

    /// Returns true if the booking was admitted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == BookingStatus::Success
    }
}
