//! Per-(hotel, room type) mutual exclusion.
//!
//! Bookings for the same room type at the same hotel must not plan
//! concurrently, or two requests could claim the same free room. The
//! registry hands out one mutex per scope; acquisition is bounded by a
//! timeout so a stuck caller turns into a retryable error instead of a
//! hang.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};

use crate::error::{Error, Result};
use crate::room::{HotelId, RoomTypeId};

/// A held scope lock. The scope is released when the guard drops.
pub struct ScopeGuard {
    _guard: ArcMutexGuard<RawMutex, ()>,
    hotel: HotelId,
    room_type: RoomTypeId,
}

impl std::fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("hotel", &self.hotel)
            .field("room_type", &self.room_type)
            .finish_non_exhaustive()
    }
}

impl ScopeGuard {
    /// The hotel this guard covers.
    #[must_use]
    pub const fn hotel(&self) -> HotelId {
        self.hotel
    }

    /// The room type this guard covers.
    #[must_use]
    pub const fn room_type(&self) -> RoomTypeId {
        self.room_type
    }
}

/// Registry of per-(hotel, room type) locks.
///
/// The registry itself is cheap to share behind an `Arc`; every process
/// participating in booking must use the same instance for the exclusion
/// to mean anything.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use innkeep::{HotelId, RoomTypeId, ScopeRegistry};
///
/// let scopes = ScopeRegistry::new();
/// let guard = scopes
///     .acquire(HotelId(1), RoomTypeId(1), Duration::from_millis(100))
///     .unwrap();
/// drop(guard);
/// ```
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    scopes: Mutex<HashMap<(HotelId, RoomTypeId), Arc<Mutex<()>>>>,
}

impl ScopeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for one (hotel, room type) scope, waiting at most
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeTimeout`] if the scope is still held by
    /// another caller when the timeout elapses.
    pub fn acquire(
        &self,
        hotel: HotelId,
        room_type: RoomTypeId,
        timeout: Duration,
    ) -> Result<ScopeGuard> {
        let scope = {
            let mut scopes = self.scopes.lock();
            Arc::clone(scopes.entry((hotel, room_type)).or_default())
        };

        match scope.try_lock_arc_for(timeout) {
            Some(guard) => Ok(ScopeGuard {
                _guard: guard,
                hotel,
                room_type,
            }),
            None => Err(Error::ScopeTimeout {
                hotel: hotel.value(),
                room_type: room_type.value(),
                millis: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    /// Acquires the locks for several room types at one hotel.
    ///
    /// Room types are locked in ascending id order, so two requests
    /// involving overlapping type sets always contend in the same order
    /// and cannot deadlock against each other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeTimeout`] if any scope cannot be acquired in
    /// time; scopes already acquired are released.
    pub fn acquire_many(
        &self,
        hotel: HotelId,
        room_types: &[RoomTypeId],
        timeout: Duration,
    ) -> Result<Vec<ScopeGuard>> {
        let mut ordered: Vec<RoomTypeId> = room_types.to_vec();
        ordered.sort_unstable();
        ordered.dedup();

        let mut guards = Vec::with_capacity(ordered.len());
        for room_type in ordered {
            guards.push(self.acquire(hotel, room_type, timeout)?);
        }
        Ok(guards)
    }
}
