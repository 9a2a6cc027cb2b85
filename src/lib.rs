#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library implementing the admission and rearrangement core of a
//! hotel reservation system: deciding whether a booking request fits the
//! available inventory, placing it on concrete rooms, and rearranging
//! existing reservations when a straightforward placement fails.
//!
//! ## Core Types
//!
//! - [`StayRange`]: validated half-open date ranges with the conflict
//!   predicate
//! - [`Room`], [`RoomType`], [`Reservation`]: the inventory model
//! - [`BookingRequest`] and [`BookingOutcome`]: request/response of the
//!   booking operation
//! - [`Database`]: the `SQLite` storage collaborator
//! - [`ScopeRegistry`]: per-(hotel, room type) mutual exclusion
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use innkeep::config::ConfigBuilder;
//! use innkeep::database::{Database, DatabaseConfig};
//! use innkeep::operations::reserve;
//! use innkeep::{BookingRequest, ScopeRegistry, StayRange};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let scopes = ScopeRegistry::new();
//! let config = ConfigBuilder::new().build().unwrap();
//!
//! let hotel = db.create_hotel("Grand").unwrap();
//! let double = db.create_room_type("double").unwrap();
//! db.create_room(hotel, double, 11).unwrap();
//!
//! let stay = StayRange::new(
//!     NaiveDate::from_ymd_opt(2014, 7, 2).unwrap(),
//!     NaiveDate::from_ymd_opt(2014, 7, 4).unwrap(),
//! ).unwrap();
//! let request = BookingRequest::new(hotel, stay, "guest@example.com")
//!     .with_rooms(double, 1);
//!
//! let outcome = reserve(&mut db, &scopes, &config, &request).unwrap();
//! assert!(outcome.is_success());
//! ```

pub mod allocation;
pub mod booking;
pub mod config;
pub mod database;
pub mod dates;
pub mod error;
pub mod lock;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod room;

// Re-export key types at crate root for convenience
pub use booking::{BookingOutcome, BookingRequest, BookingStatus};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use dates::StayRange;
pub use error::{Error, Result};
pub use lock::{ScopeGuard, ScopeRegistry};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{ExecutionResult, OperationPlan, PlanAction, PlanExecutor};
pub use reservation::{Reservation, ReservationId};
pub use room::{HotelId, Room, RoomId, RoomType, RoomTypeId};
