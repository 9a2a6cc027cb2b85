//! Error types for the innkeep library.
//!
//! This module defines the crate-wide error enum and result alias used
//! throughout the library. Business outcomes that callers are expected to
//! handle as data (such as insufficient inventory) are deliberately not
//! errors; see [`crate::booking::BookingStatus`].

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized `Result` type for innkeep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all innkeep operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced entity does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// A field failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// Description of the validation failure.
        message: String,
    },

    /// A stay range was constructed with a non-positive length.
    #[error("invalid stay: end date {end} must be after start date {start}")]
    InvalidStay {
        /// Requested check-in date.
        start: NaiveDate,
        /// Requested check-out date.
        end: NaiveDate,
    },

    /// The booking scope for a (hotel, room type) pair stayed busy past
    /// the configured timeout. Retryable.
    #[error("booking scope for hotel {hotel} room type {room_type} busy after {millis}ms")]
    ScopeTimeout {
        /// Hotel whose scope could not be acquired.
        hotel: i64,
        /// Room type whose scope could not be acquired.
        room_type: i64,
        /// How long the acquisition waited, in milliseconds.
        millis: u64,
    },

    /// A transaction rollback itself failed. The database may hold a
    /// partial write set and needs manual reconciliation.
    #[error("rollback failed, manual reconciliation required: {details}")]
    RollbackFailed {
        /// Description of the rollback failure.
        details: String,
    },

    /// An underlying database error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidStay { .. })
    }

    /// Returns true if retrying the operation may succeed without any
    /// change on the caller's side.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ScopeTimeout { .. })
    }
}
