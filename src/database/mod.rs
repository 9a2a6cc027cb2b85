//! SQLite-backed reservation storage.
//!
//! The database is the storage collaborator for the booking operations:
//! it answers snapshot queries (rooms and reservations per hotel and room
//! type) and applies the writes the plan executor hands it. Connections
//! run in WAL mode so concurrent bookings can each hold their own
//! connection to the same file.

pub mod config;
pub mod connection;
pub mod migrations;
pub mod operations;
pub mod schema;
pub mod transaction;

#[cfg(test)]
pub mod test_util;

pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;
