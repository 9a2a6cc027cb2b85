//! Test utilities for database operations.
//!
//! Only compiled for tests; integration tests build their own fixtures in
//! `tests/common`.

use tempfile::tempdir;

use super::config::DatabaseConfig;
use super::connection::Database;

/// Creates a fresh database in a temporary directory.
///
/// The temporary directory is intentionally leaked so the database file
/// outlives the returned handle for the duration of the test process.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    // Keep the directory alive for the rest of the test run.
    std::mem::forget(dir);
    let config = DatabaseConfig::new(path);
    Database::open(config).expect("failed to open test database")
}
