//! CRUD operations for hotels, rooms and reservations.
//!
//! The free functions suffixed `_in` operate on a borrowed connection so
//! that the plan executor can run them inside one transaction; the
//! `Database` methods wrap them for standalone use.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::allocation::inventory::free_rooms;
use crate::dates::StayRange;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId};
use crate::room::{HotelId, Room, RoomId, RoomType, RoomTypeId};

use super::connection::Database;
use super::schema::{
    DELETE_RESERVATION, INSERT_HOTEL, INSERT_RESERVATION, INSERT_ROOM, INSERT_ROOM_TYPE,
    SELECT_HOTEL_EXISTS, SELECT_RESERVATIONS_BY_ROOM, SELECT_RESERVATIONS_BY_SCOPE,
    SELECT_RESERVATION_BY_ID, SELECT_ROOMS_BY_SCOPE, SELECT_ROOM_BY_ID, SELECT_ROOM_TYPE_BY_NAME,
    SELECT_ROOM_TYPE_EXISTS, UPDATE_RESERVATION_ROOM,
};

/// Formats a date for storage as ISO-8601 text.
fn date_to_sql(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses an ISO-8601 date from a stored column value.
fn date_from_sql(value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Maps a row from the reservations table to a `Reservation`.
fn row_to_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let room_id: i64 = row.get(1)?;
    let start_text: String = row.get(2)?;
    let end_text: String = row.get(3)?;
    let guest: String = row.get(4)?;

    let start = date_from_sql(&start_text)?;
    let end = date_from_sql(&end_text)?;
    let stay = StayRange::new(start, end)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Reservation::new(
        ReservationId(id),
        RoomId(room_id),
        stay,
        guest,
    ))
}

/// Maps a row from the rooms table to a `Room`.
fn row_to_room(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: RoomId(row.get(0)?),
        hotel: HotelId(row.get(1)?),
        room_type: RoomTypeId(row.get(2)?),
        number: row.get(3)?,
    })
}

/// Inserts a reservation using a borrowed connection.
pub(crate) fn create_reservation_in(
    conn: &Connection,
    room: RoomId,
    stay: StayRange,
    guest: &str,
) -> Result<ReservationId> {
    conn.execute(
        INSERT_RESERVATION,
        params![
            room.value(),
            date_to_sql(stay.start()),
            date_to_sql(stay.end()),
            guest
        ],
    )?;
    Ok(ReservationId(conn.last_insert_rowid()))
}

/// Moves a reservation to a different room using a borrowed connection.
///
/// Returns false if the reservation does not exist.
pub(crate) fn update_reservation_room_in(
    conn: &Connection,
    id: ReservationId,
    room: RoomId,
) -> Result<bool> {
    let rows = conn.execute(UPDATE_RESERVATION_ROOM, params![room.value(), id.value()])?;
    Ok(rows > 0)
}

/// Deletes a reservation using a borrowed connection.
///
/// Returns false if the reservation does not exist.
pub(crate) fn delete_reservation_in(conn: &Connection, id: ReservationId) -> Result<bool> {
    let rows = conn.execute(DELETE_RESERVATION, params![id.value()])?;
    Ok(rows > 0)
}

impl Database {
    /// Creates a hotel and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_hotel(&self, name: &str) -> Result<HotelId> {
        self.conn.execute(INSERT_HOTEL, params![name])?;
        Ok(HotelId(self.conn.last_insert_rowid()))
    }

    /// Returns true if the hotel id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn hotel_exists(&self, hotel: HotelId) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(SELECT_HOTEL_EXISTS, params![hotel.value()], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Creates a room type and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the name is
    /// already taken.
    pub fn create_room_type(&self, name: &str) -> Result<RoomTypeId> {
        self.conn.execute(INSERT_ROOM_TYPE, params![name])?;
        Ok(RoomTypeId(self.conn.last_insert_rowid()))
    }

    /// Looks up a room type by its unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room_type(&self, name: &str) -> Result<Option<RoomType>> {
        let room_type = self
            .conn
            .query_row(SELECT_ROOM_TYPE_BY_NAME, params![name], |row| {
                Ok(RoomType {
                    id: RoomTypeId(row.get(0)?),
                    name: row.get(1)?,
                })
            })
            .optional()?;
        Ok(room_type)
    }

    /// Returns true if the room type id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn room_type_exists(&self, room_type: RoomTypeId) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(SELECT_ROOM_TYPE_EXISTS, params![room_type.value()], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Creates a room and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the door
    /// number is already taken at the hotel.
    pub fn create_room(&self, hotel: HotelId, room_type: RoomTypeId, number: u32) -> Result<RoomId> {
        self.conn.execute(
            INSERT_ROOM,
            params![hotel.value(), room_type.value(), number],
        )?;
        Ok(RoomId(self.conn.last_insert_rowid()))
    }

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(&self, room: RoomId) -> Result<Option<Room>> {
        let room = self
            .conn
            .query_row(SELECT_ROOM_BY_ID, params![room.value()], row_to_room)
            .optional()?;
        Ok(room)
    }

    /// Lists the rooms of one type at one hotel, ordered by room id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&self, hotel: HotelId, room_type: RoomTypeId) -> Result<Vec<Room>> {
        let mut stmt = self.conn.prepare(SELECT_ROOMS_BY_SCOPE)?;
        let rooms = stmt
            .query_map(params![hotel.value(), room_type.value()], row_to_room)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rooms)
    }

    /// Lists the reservations held on rooms of one type at one hotel, in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(
        &self,
        hotel: HotelId,
        room_type: RoomTypeId,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(SELECT_RESERVATIONS_BY_SCOPE)?;
        let reservations = stmt
            .query_map(
                params![hotel.value(), room_type.value()],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Lists the reservations of a single room, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_room(&self, room: RoomId) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(SELECT_RESERVATIONS_BY_ROOM)?;
        let reservations = stmt
            .query_map(params![room.value()], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let reservation = self
            .conn
            .query_row(
                SELECT_RESERVATION_BY_ID,
                params![id.value()],
                row_to_reservation,
            )
            .optional()?;
        Ok(reservation)
    }

    /// Creates a reservation and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_reservation(
        &self,
        room: RoomId,
        stay: StayRange,
        guest: &str,
    ) -> Result<ReservationId> {
        create_reservation_in(&self.conn, room, stay, guest)
    }

    /// Moves a reservation to a different room.
    ///
    /// Returns false if the reservation does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_reservation_room(&self, id: ReservationId, room: RoomId) -> Result<bool> {
        update_reservation_room_in(&self.conn, id, room)
    }

    /// Deletes a reservation.
    ///
    /// Returns false if the reservation does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation(&self, id: ReservationId) -> Result<bool> {
        delete_reservation_in(&self.conn, id)
    }

    /// Finds the rooms of one type at one hotel that can take the given
    /// stay, ordered by room id.
    ///
    /// A room qualifies when none of its reservations block the stay
    /// under the crate's conflict predicate. An empty result is a normal
    /// answer, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the hotel or room type does not
    /// exist, or a database error if a query fails.
    pub fn find_free_rooms(
        &self,
        hotel: HotelId,
        room_type: RoomTypeId,
        stay: &StayRange,
    ) -> Result<Vec<Room>> {
        if !self.hotel_exists(hotel)? {
            return Err(Error::NotFound {
                resource: format!("hotel {hotel}"),
            });
        }
        if !self.room_type_exists(room_type)? {
            return Err(Error::NotFound {
                resource: format!("room type {room_type}"),
            });
        }

        let rooms = self.list_rooms(hotel, room_type)?;
        let reservations = self.list_reservations(hotel, room_type)?;
        Ok(free_rooms(&rooms, &reservations, stay))
    }
}
