//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use innkeep::config::ConfigBuilder;
use innkeep::database::{Database, DatabaseConfig};
use innkeep::{Config, HotelId, RoomId, RoomTypeId, ScopeRegistry, StayRange};

/// A day in July 2014, the month all fixture scenarios play in.
pub fn july(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 7, day).unwrap()
}

/// A stay `[july(start), july(end))`.
pub fn stay(start: u32, end: u32) -> StayRange {
    StayRange::new(july(start), july(end)).unwrap()
}

/// A small hotel on disk: three doubles (11, 12, 13), one suite (21) and
/// one single (31).
pub struct HotelFixture {
    pub db: Database,
    pub scopes: ScopeRegistry,
    pub config: Config,
    pub hotel: HotelId,
    pub double: RoomTypeId,
    pub suite: RoomTypeId,
    pub single: RoomTypeId,
    pub doubles: Vec<RoomId>,
    pub suite_room: RoomId,
    pub single_room: RoomId,
    db_path: PathBuf,
    _dir: TempDir,
}

impl HotelFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("innkeep.db");
        let db = Database::open(DatabaseConfig::new(&db_path)).expect("failed to open database");

        let hotel = db.create_hotel("Grand").unwrap();
        let double = db.create_room_type("double").unwrap();
        let suite = db.create_room_type("suite").unwrap();
        let single = db.create_room_type("single").unwrap();

        let doubles = [11, 12, 13]
            .iter()
            .map(|number| db.create_room(hotel, double, *number).unwrap())
            .collect();
        let suite_room = db.create_room(hotel, suite, 21).unwrap();
        let single_room = db.create_room(hotel, single, 31).unwrap();

        let config = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .build()
            .unwrap();

        Self {
            db,
            scopes: ScopeRegistry::new(),
            config,
            hotel,
            double,
            suite,
            single,
            doubles,
            suite_room,
            single_room,
            db_path,
            _dir: dir,
        }
    }

    /// Opens an independent connection to the same database file, for
    /// tests exercising concurrent access.
    pub fn open_second_connection(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.db_path)).expect("failed to reopen database")
    }
}
