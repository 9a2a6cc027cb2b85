//! Busyness-based room preference scoring.
//!
//! When several rooms can take a stay, the scorer prefers the room whose
//! calendar is already busiest around the requested dates. Packing stays
//! next to existing ones keeps long unbroken vacancy runs available on
//! the other rooms for future long requests.

use crate::dates::StayRange;
use crate::error::{Error, Result};
use crate::reservation::Reservation;
use crate::room::{Room, RoomId};

/// Scores how busy a room's calendar is around the requested stay.
///
/// The score counts reservation start dates falling inside the window
/// `[stay.start - margin, stay.end + margin]` (inclusive), plus end dates
/// falling inside the same window. A reservation lying entirely inside
/// the window therefore counts twice.
#[must_use]
pub fn busyness(
    room: RoomId,
    reservations: &[Reservation],
    stay: &StayRange,
    margin_days: i64,
) -> u32 {
    let (lo, hi) = stay.lookaround_window(margin_days);

    let mut score = 0;
    for r in reservations.iter().filter(|r| r.room() == room) {
        let s = r.stay();
        if s.start() >= lo && s.start() <= hi {
            score += 1;
        }
        if s.end() >= lo && s.end() <= hi {
            score += 1;
        }
    }
    score
}

/// Picks the best room for a stay from a list of free candidates.
///
/// The candidate with the maximum busyness score wins; ties keep the
/// earliest candidate in input order, so the choice is deterministic for
/// a given snapshot.
///
/// # Errors
///
/// Returns a validation error if `candidates` is empty; callers must
/// check availability before asking for a preference.
pub fn choose_best_room(
    candidates: &[Room],
    reservations: &[Reservation],
    stay: &StayRange,
    margin_days: i64,
) -> Result<Room> {
    let mut best: Option<(Room, u32)> = None;

    for candidate in candidates {
        let score = busyness(candidate.id, reservations, stay, margin_days);
        match &best {
            // Strict comparison keeps the first candidate on ties.
            Some((_, best_score)) if score <= *best_score => {}
            _ => best = Some((*candidate, score)),
        }
    }

    best.map(|(room, _)| room).ok_or_else(|| Error::Validation {
        field: "candidates".into(),
        message: "cannot choose a room from an empty candidate list".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::ReservationId;
    use crate::room::{HotelId, RoomTypeId};
    use chrono::NaiveDate;

    fn stay(start: u32, end: u32) -> StayRange {
        StayRange::new(
            NaiveDate::from_ymd_opt(2014, 7, start).unwrap(),
            NaiveDate::from_ymd_opt(2014, 7, end).unwrap(),
        )
        .unwrap()
    }

    fn room(id: i64) -> Room {
        Room {
            id: RoomId(id),
            hotel: HotelId(1),
            room_type: RoomTypeId(1),
            number: u32::try_from(id).unwrap() + 10,
        }
    }

    fn reservation(id: i64, room: i64, start: u32, end: u32) -> Reservation {
        Reservation::new(
            ReservationId(id),
            RoomId(room),
            stay(start, end),
            "guest@example.com",
        )
    }

    #[test]
    fn test_busyness_counts_boundaries_in_window() {
        // Request [07-07, 07-08) with a 3-day margin looks at [07-04, 07-11].
        let reservations = vec![
            reservation(1, 1, 2, 4),  // only the end date (07-04) is in window
            reservation(2, 1, 5, 6),  // both boundaries in window
            reservation(3, 2, 2, 5),  // only the end date in window
        ];

        assert_eq!(busyness(RoomId(1), &reservations, &stay(7, 8), 3), 3);
        assert_eq!(busyness(RoomId(2), &reservations, &stay(7, 8), 3), 1);
        assert_eq!(busyness(RoomId(3), &reservations, &stay(7, 8), 3), 0);
    }

    #[test]
    fn test_busiest_adjacent_room_wins() {
        let candidates = vec![room(1), room(2), room(3)];
        let reservations = vec![
            reservation(1, 1, 2, 4),
            reservation(2, 1, 5, 6),
            reservation(3, 2, 2, 5),
        ];

        let best = choose_best_room(&candidates, &reservations, &stay(7, 8), 3).unwrap();
        assert_eq!(best.id, RoomId(1));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let candidates = vec![room(2), room(1)];
        // No reservations at all: every candidate scores zero.
        let best = choose_best_room(&candidates, &[], &stay(7, 8), 3).unwrap();
        assert_eq!(best.id, RoomId(2));
    }

    #[test]
    fn test_empty_candidates_is_an_error() {
        let err = choose_best_room(&[], &[], &stay(7, 8), 3).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_zero_margin_narrows_window() {
        // With no margin only boundaries inside [07-07, 07-08] count.
        let reservations = vec![reservation(1, 1, 5, 7), reservation(2, 1, 2, 4)];
        assert_eq!(busyness(RoomId(1), &reservations, &stay(7, 8), 0), 1);
    }

    #[test]
    fn test_deterministic_for_same_snapshot() {
        let candidates = vec![room(1), room(2)];
        let reservations = vec![reservation(1, 2, 5, 7)];

        let first = choose_best_room(&candidates, &reservations, &stay(7, 9), 3).unwrap();
        for _ in 0..10 {
            let again = choose_best_room(&candidates, &reservations, &stay(7, 9), 3).unwrap();
            assert_eq!(again.id, first.id);
        }
    }
}
