//! End-to-end rearrangement scenarios.

mod common;

use common::{stay, HotelFixture};
use innkeep::operations::{rearrange, reserve};
use innkeep::{BookingRequest, Reservation, StayRange};

/// No room may hold two stays that conflict, with the later-starting
/// stay oriented as the request.
fn assert_no_double_booking(reservations: &[Reservation]) {
    for (i, a) in reservations.iter().enumerate() {
        for b in &reservations[i + 1..] {
            if a.room() != b.room() {
                continue;
            }
            let (first, second): (StayRange, StayRange) = if a.stay().start() <= b.stay().start() {
                (a.stay(), b.stay())
            } else {
                (b.stay(), a.stay())
            };
            assert!(
                !second.conflicts_with(&first),
                "room {} double-booked: {} vs {}",
                a.room(),
                a,
                b
            );
        }
    }
}

#[test]
fn scattered_stays_consolidate_to_admit_a_long_stay() {
    let mut f = HotelFixture::new();
    let (r1, r2, r3) = (f.doubles[0], f.doubles[1], f.doubles[2]);

    f.db.create_reservation(r1, stay(2, 4), "a@example.com").unwrap();
    f.db.create_reservation(r2, stay(5, 6), "b@example.com").unwrap();
    f.db.create_reservation(r2, stay(7, 8), "c@example.com").unwrap();
    f.db.create_reservation(r3, stay(2, 5), "d@example.com").unwrap();
    f.db.create_reservation(r3, stay(6, 7), "e@example.com").unwrap();

    // No room is free for the whole of [07-01, 07-06)...
    assert!(f.db.find_free_rooms(f.hotel, f.double, &stay(1, 6)).unwrap().is_empty());

    // ...but a booking still succeeds via rearrangement.
    let request = BookingRequest::new(f.hotel, stay(1, 6), "guest@example.com")
        .with_rooms(f.double, 1);
    let outcome = reserve(&mut f.db, &f.scopes, &f.config, &request).unwrap();
    assert!(outcome.is_success());

    let all = f.db.list_reservations(f.hotel, f.double).unwrap();
    assert_eq!(all.len(), 6);
    assert_no_double_booking(&all);
}

#[test]
fn standalone_rearrange_admits_a_stay_into_the_gap() {
    let mut f = HotelFixture::new();
    let (r1, r2) = (f.doubles[0], f.doubles[1]);

    // [d1, d2) and [d4, d5) on different rooms; [d2, d4) fits only if
    // the two consolidate onto one room.
    f.db.create_reservation(r1, stay(1, 2), "a@example.com").unwrap();
    f.db.create_reservation(r2, stay(4, 5), "b@example.com").unwrap();

    // Use just two of the doubles by filling the third.
    f.db.create_reservation(f.doubles[2], stay(1, 5), "c@example.com")
        .unwrap();

    let admitted = rearrange(
        &mut f.db,
        &f.scopes,
        &f.config,
        f.hotel,
        f.double,
        stay(2, 4),
        "guest@example.com",
    )
    .unwrap();
    assert!(admitted);

    let all = f.db.list_reservations(f.hotel, f.double).unwrap();
    assert_eq!(all.len(), 4);
    assert_no_double_booking(&all);
}

#[test]
fn infeasible_rearrange_changes_nothing() {
    let mut f = HotelFixture::new();

    // Saturate every double over the requested window.
    for room in f.doubles.clone() {
        f.db.create_reservation(room, stay(2, 6), "a@example.com").unwrap();
    }
    let before = f.db.list_reservations(f.hotel, f.double).unwrap();

    let admitted = rearrange(
        &mut f.db,
        &f.scopes,
        &f.config,
        f.hotel,
        f.double,
        stay(3, 5),
        "guest@example.com",
    )
    .unwrap();
    assert!(!admitted);
    assert_eq!(f.db.list_reservations(f.hotel, f.double).unwrap(), before);
}

#[test]
fn rearranged_reservations_keep_ids_dates_and_guests() {
    let mut f = HotelFixture::new();
    let (r1, r2) = (f.doubles[0], f.doubles[1]);

    f.db.create_reservation(r1, stay(1, 2), "a@example.com").unwrap();
    f.db.create_reservation(r2, stay(4, 5), "b@example.com").unwrap();
    f.db.create_reservation(f.doubles[2], stay(1, 5), "c@example.com")
        .unwrap();
    let before = f.db.list_reservations(f.hotel, f.double).unwrap();

    rearrange(
        &mut f.db,
        &f.scopes,
        &f.config,
        f.hotel,
        f.double,
        stay(2, 4),
        "guest@example.com",
    )
    .unwrap();

    let after = f.db.list_reservations(f.hotel, f.double).unwrap();
    for old in &before {
        let new = after.iter().find(|r| r.id() == old.id()).unwrap();
        assert_eq!(new.stay(), old.stay());
        assert_eq!(new.guest(), old.guest());
    }
}

#[test]
fn back_to_back_stays_do_not_trigger_moves() {
    let mut f = HotelFixture::new();
    f.db.create_reservation(f.single_room, stay(2, 4), "a@example.com")
        .unwrap();

    let admitted = rearrange(
        &mut f.db,
        &f.scopes,
        &f.config,
        f.hotel,
        f.single,
        stay(4, 6),
        "guest@example.com",
    )
    .unwrap();
    assert!(admitted);

    let all = f.db.list_reservations(f.hotel, f.single).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|r| r.room() == f.single_room));
}
