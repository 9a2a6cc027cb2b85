//! Stay date ranges and the conflict predicate.
//!
//! A stay is a half-open range of nights `[start, end)`: the guest checks
//! in on `start` and the room is free again on `end`. All availability
//! decisions in the crate go through [`StayRange::conflicts_with`].

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A validated half-open date range `[start, end)` for a stay.
///
/// The invariant `end > start` is enforced at construction: every stay is
/// at least one night long.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::StayRange;
///
/// let start = NaiveDate::from_ymd_opt(2014, 7, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2014, 7, 4).unwrap();
/// let stay = StayRange::new(start, end).unwrap();
/// assert_eq!(stay.nights(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl StayRange {
    /// Creates a stay range, validating that `end` is after `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStay`] if `end <= start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(Error::InvalidStay { start, end });
        }
        Ok(Self { start, end })
    }

    /// The check-in date.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// The check-out date (exclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights covered by the stay.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns true if this requested stay is blocked by `existing`.
    ///
    /// The predicate is asymmetric by design:
    ///
    /// ```text
    /// request.start < existing.end  &&  existing.start <= request.end
    /// ```
    ///
    /// A request starting on an existing reservation's checkout date does
    /// not conflict (same-day turnover), while an existing reservation
    /// starting on the request's checkout date does. Callers must orient
    /// the operands with the candidate stay as `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::StayRange;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2014, 7, day).unwrap();
    /// let existing = StayRange::new(d(2), d(4)).unwrap();
    ///
    /// // Check-in on the existing checkout date is fine.
    /// let request = StayRange::new(d(4), d(6)).unwrap();
    /// assert!(!request.conflicts_with(&existing));
    ///
    /// // Overlapping nights are not.
    /// let request = StayRange::new(d(3), d(6)).unwrap();
    /// assert!(request.conflicts_with(&existing));
    /// ```
    #[must_use]
    pub fn conflicts_with(&self, existing: &Self) -> bool {
        self.start < existing.end && existing.start <= self.end
    }

    /// The scoring window around this stay: `[start - margin, end + margin]`.
    ///
    /// Used by the preference scorer to count reservation boundaries near
    /// the requested dates.
    #[must_use]
    pub fn lookaround_window(&self, margin_days: i64) -> (NaiveDate, NaiveDate) {
        (
            self.start - Duration::days(margin_days),
            self.end + Duration::days(margin_days),
        )
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
