//! Interval-partitioning rearrangement planner.
//!
//! When no room of a type is free for a new stay, the existing
//! reservations of that type may still be shuffleable onto different
//! rooms so that everyone fits. The planner answers that question over a
//! pure snapshot: nothing is written unless a complete assignment exists.

use crate::dates::StayRange;
use crate::reservation::{Reservation, ReservationId};
use crate::room::{Room, RoomId};

/// One planned placement: which room a stay should occupy.
///
/// `reservation` is `None` for the incoming stay that triggered the
/// rearrangement, and the id of an existing reservation otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    /// The existing reservation being (re)placed, if any.
    pub reservation: Option<ReservationId>,
    /// The room the stay should occupy.
    pub room: RoomId,
}

/// Internal planning entry: an existing reservation or the new stay.
#[derive(Debug, Clone, Copy)]
struct Entry {
    reservation: Option<ReservationId>,
    stay: StayRange,
}

/// Plans a rearrangement that fits all existing reservations plus one new
/// stay onto the given rooms.
///
/// The algorithm is greedy interval partitioning:
///
/// 1. Entries are the existing reservations in input (insertion) order
///    with the new stay appended last.
/// 2. Entries are stably sorted by start date; ties keep input order, so
///    the new stay sorts after existing reservations starting the same
///    day.
/// 3. Each entry takes the lowest room id not already used by a
///    conflicting earlier entry.
///
/// Returns one assignment per entry (existing reservations first in
/// their sorted position, the new stay marked with `reservation: None`),
/// or `None` when some entry has no admissible room. Greedy first-fit is
/// optimal here: the number of rooms needed equals the maximum number of
/// stays that share a night, so if that never exceeds the room count a
/// complete assignment is always found.
#[must_use]
pub fn plan_rearrangement(
    rooms: &[Room],
    reservations: &[Reservation],
    new_stay: &StayRange,
) -> Option<Vec<SlotAssignment>> {
    let mut room_ids: Vec<RoomId> = rooms.iter().map(|r| r.id).collect();
    room_ids.sort_unstable();

    let mut entries: Vec<Entry> = reservations
        .iter()
        .map(|r| Entry {
            reservation: Some(r.id()),
            stay: r.stay(),
        })
        .collect();
    entries.push(Entry {
        reservation: None,
        stay: *new_stay,
    });
    entries.sort_by_key(|e| e.stay.start());

    let mut assignments: Vec<SlotAssignment> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        // Rooms taken by earlier entries whose stay conflicts with this
        // one. Earlier entries start no later, so they are the existing
        // side of the predicate.
        let taken: Vec<RoomId> = entries[..index]
            .iter()
            .zip(assignments.iter())
            .filter(|(earlier, _)| entry.stay.conflicts_with(&earlier.stay))
            .map(|(_, assignment)| assignment.room)
            .collect();

        let room = room_ids.iter().find(|id| !taken.contains(id))?;
        assignments.push(SlotAssignment {
            reservation: entry.reservation,
            room: *room,
        });
    }

    Some(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
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

    /// No two stays assigned to the same room may conflict (oriented with
    /// the later-starting stay as the request).
    fn assert_no_room_shares_conflicting_stays(
        assignments: &[SlotAssignment],
        reservations: &[Reservation],
        new_stay: &StayRange,
    ) {
        let stay_of = |a: &SlotAssignment| match a.reservation {
            Some(id) => reservations
                .iter()
                .find(|r| r.id() == id)
                .map(Reservation::stay)
                .unwrap(),
            None => *new_stay,
        };

        for (i, a) in assignments.iter().enumerate() {
            for b in &assignments[i + 1..] {
                if a.room != b.room {
                    continue;
                }
                let (first, second) = if stay_of(a).start() <= stay_of(b).start() {
                    (stay_of(a), stay_of(b))
                } else {
                    (stay_of(b), stay_of(a))
                };
                assert!(
                    !second.conflicts_with(&first),
                    "room {} double-booked: {first} vs {second}",
                    a.room
                );
            }
        }
    }

    #[test]
    fn test_single_room_single_stay() {
        let rooms = vec![room(1)];
        let plan = plan_rearrangement(&rooms, &[], &stay(2, 4)).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].reservation, None);
        assert_eq!(plan[0].room, RoomId(1));
    }

    #[test]
    fn test_no_rooms_is_infeasible() {
        assert!(plan_rearrangement(&[], &[], &stay(2, 4)).is_none());
    }

    #[test]
    fn test_two_overlapping_stays_need_two_rooms() {
        let reservations = vec![reservation(1, 1, 2, 5)];

        // One room cannot take an overlapping second stay.
        assert!(plan_rearrangement(&[room(1)], &reservations, &stay(3, 6)).is_none());

        // Two rooms can.
        let plan = plan_rearrangement(&[room(1), room(2)], &reservations, &stay(3, 6)).unwrap();
        assert_eq!(plan.len(), 2);
        assert_no_room_shares_conflicting_stays(&plan, &reservations, &stay(3, 6));
    }

    #[test]
    fn test_gap_between_stays_frees_a_room() {
        // Two stays pinned to different rooms leave a hole that the new
        // stay can only use if one of them moves.
        let reservations = vec![
            reservation(1, 1, 1, 2), // room 1, [d1, d2)
            reservation(2, 2, 4, 5), // room 2, [d4, d5)
        ];
        let rooms = vec![room(1), room(2)];

        let plan = plan_rearrangement(&rooms, &reservations, &stay(2, 4)).unwrap();
        assert_eq!(plan.len(), 3);
        assert_no_room_shares_conflicting_stays(&plan, &reservations, &stay(2, 4));
    }

    #[test]
    fn test_five_reservations_plus_long_stay_on_three_rooms() {
        let reservations = vec![
            reservation(1, 1, 2, 4),
            reservation(2, 2, 5, 6),
            reservation(3, 2, 7, 8),
            reservation(4, 3, 2, 5),
            reservation(5, 3, 6, 7),
        ];
        let rooms = vec![room(1), room(2), room(3)];

        let new_stay = stay(1, 6);
        let plan = plan_rearrangement(&rooms, &reservations, &new_stay).unwrap();
        assert_eq!(plan.len(), 6);
        assert_no_room_shares_conflicting_stays(&plan, &reservations, &new_stay);

        // Every entry got exactly one placement and the new stay is there.
        assert_eq!(
            plan.iter().filter(|a| a.reservation.is_none()).count(),
            1
        );
    }

    #[test]
    fn test_new_stay_takes_lowest_free_room() {
        // The new stay sorts first and grabs the lowest room id.
        let rooms = vec![room(3), room(1), room(2)];
        let plan = plan_rearrangement(&rooms, &[], &stay(2, 4)).unwrap();
        assert_eq!(plan[0].room, RoomId(1));
    }

    #[test]
    fn test_same_start_keeps_existing_before_new() {
        // An existing reservation starting the same day as the new stay
        // sorts first and takes the lower room.
        let reservations = vec![reservation(1, 2, 2, 4)];
        let rooms = vec![room(1), room(2)];

        let plan = plan_rearrangement(&rooms, &reservations, &stay(2, 3)).unwrap();
        let existing = plan.iter().find(|a| a.reservation.is_some()).unwrap();
        let new = plan.iter().find(|a| a.reservation.is_none()).unwrap();
        assert_eq!(existing.room, RoomId(1));
        assert_eq!(new.room, RoomId(2));
    }

    #[test]
    fn test_back_to_back_stays_share_a_room() {
        let reservations = vec![reservation(1, 1, 2, 4)];
        let rooms = vec![room(1)];

        // Same-day turnover: one room is enough for [2,4) + [4,6).
        let plan = plan_rearrangement(&rooms, &reservations, &stay(4, 6)).unwrap();
        assert!(plan.iter().all(|a| a.room == RoomId(1)));
    }

    #[cfg(feature = "property-tests")]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn stays_strategy() -> impl Strategy<Value = Vec<(u32, u32)>> {
            proptest::collection::vec((1u32..25, 1u32..5), 0..8)
                .prop_map(|v| v.into_iter().map(|(s, len)| (s, s + len)).collect())
        }

        proptest! {
            // PROPERTY: an accepted plan never double-books a room.
            #[test]
            fn prop_accepted_plans_have_no_conflicts(
                spec in stays_strategy(),
                new_start in 1u32..25,
                new_len in 1u32..5,
                room_count in 1i64..6,
            ) {
                let reservations: Vec<Reservation> = spec
                    .iter()
                    .enumerate()
                    .map(|(i, (s, e))| {
                        reservation(i64::try_from(i).unwrap() + 1, 1, *s, *e)
                    })
                    .collect();
                let rooms: Vec<Room> = (1..=room_count).map(room).collect();
                let new_stay = stay(new_start, new_start + new_len);

                if let Some(plan) = plan_rearrangement(&rooms, &reservations, &new_stay) {
                    prop_assert_eq!(plan.len(), reservations.len() + 1);
                    assert_no_room_shares_conflicting_stays(&plan, &reservations, &new_stay);
                }
            }

            // PROPERTY: with as many rooms as entries a plan always exists.
            #[test]
            fn prop_enough_rooms_is_always_feasible(
                spec in stays_strategy(),
                new_start in 1u32..25,
                new_len in 1u32..5,
            ) {
                let reservations: Vec<Reservation> = spec
                    .iter()
                    .enumerate()
                    .map(|(i, (s, e))| {
                        reservation(i64::try_from(i).unwrap() + 1, 1, *s, *e)
                    })
                    .collect();
                let rooms: Vec<Room> = (1..=i64::try_from(reservations.len()).unwrap() + 1)
                    .map(room)
                    .collect();
                let new_stay = stay(new_start, new_start + new_len);

                prop_assert!(plan_rearrangement(&rooms, &reservations, &new_stay).is_some());
            }
        }
    }
}
