//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the innkeep reservation store.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the hotels table.
pub const CREATE_HOTELS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS hotels (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )";

/// SQL statement to create the room types table.
///
/// Type names are unique; bookings may look up a type by name.
pub const CREATE_ROOM_TYPES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_types (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )";

/// SQL statement to create the rooms table.
///
/// Door numbers are unique within a hotel.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY,
        hotel_id INTEGER NOT NULL REFERENCES hotels(id),
        room_type_id INTEGER NOT NULL REFERENCES room_types(id),
        number INTEGER NOT NULL,
        UNIQUE (hotel_id, number)
    )";

/// SQL statement to create the reservations table.
///
/// Dates are stored as ISO-8601 text in half-open `[start, end)` form.
/// Row ids double as reservation ids and encode insertion order, which
/// the rearrangement planner relies on.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY,
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        guest TEXT NOT NULL
    )";

/// SQL statement to create an index on rooms by hotel and type.
///
/// This index speeds up inventory snapshots, which always select one
/// (hotel, room type) pair.
pub const CREATE_ROOM_SCOPE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_rooms_scope ON rooms(hotel_id, room_type_id)";

/// SQL statement to create an index on reservations by room.
pub const CREATE_RESERVATION_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_room ON reservations(room_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a hotel.
pub const INSERT_HOTEL: &str = "INSERT INTO hotels (name) VALUES (?)";

/// SQL statement to insert a room type.
pub const INSERT_ROOM_TYPE: &str = "INSERT INTO room_types (name) VALUES (?)";

/// SQL statement to insert a room.
pub const INSERT_ROOM: &str =
    "INSERT INTO rooms (hotel_id, room_type_id, number) VALUES (?, ?, ?)";

/// SQL statement to look up a room type by name.
pub const SELECT_ROOM_TYPE_BY_NAME: &str = "SELECT id, name FROM room_types WHERE name = ?";

/// SQL statement to check whether a room type id exists.
pub const SELECT_ROOM_TYPE_EXISTS: &str = "SELECT 1 FROM room_types WHERE id = ?";

/// SQL statement to check whether a hotel id exists.
pub const SELECT_HOTEL_EXISTS: &str = "SELECT 1 FROM hotels WHERE id = ?";

/// SQL statement to select a room by id.
pub const SELECT_ROOM_BY_ID: &str =
    "SELECT id, hotel_id, room_type_id, number FROM rooms WHERE id = ?";

/// SQL statement to list the rooms of one type at one hotel, ordered by
/// room id so allocation is deterministic.
pub const SELECT_ROOMS_BY_SCOPE: &str = r"
    SELECT id, hotel_id, room_type_id, number
    FROM rooms
    WHERE hotel_id = ? AND room_type_id = ?
    ORDER BY id
";

/// SQL statement to list the reservations held on rooms of one type at
/// one hotel, in insertion order.
pub const SELECT_RESERVATIONS_BY_SCOPE: &str = r"
    SELECT r.id, r.room_id, r.start_date, r.end_date, r.guest
    FROM reservations r
    JOIN rooms ON rooms.id = r.room_id
    WHERE rooms.hotel_id = ? AND rooms.room_type_id = ?
    ORDER BY r.id
";

/// SQL statement to list the reservations of a single room, in insertion
/// order.
pub const SELECT_RESERVATIONS_BY_ROOM: &str = r"
    SELECT id, room_id, start_date, end_date, guest
    FROM reservations
    WHERE room_id = ?
    ORDER BY id
";

/// SQL statement to select a reservation by id.
pub const SELECT_RESERVATION_BY_ID: &str = r"
    SELECT id, room_id, start_date, end_date, guest
    FROM reservations
    WHERE id = ?
";

/// SQL statement to insert a reservation.
///
/// Used by both single and plan-executed create operations.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (room_id, start_date, end_date, guest)
    VALUES (?, ?, ?, ?)
";

/// SQL statement to move a reservation to a different room.
pub const UPDATE_RESERVATION_ROOM: &str = "UPDATE reservations SET room_id = ? WHERE id = ?";

/// SQL statement to delete a reservation by id.
pub const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";
