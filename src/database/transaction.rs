//! Transaction management utilities.
//!
//! This module provides batch helpers for seeding or clearing many
//! reservations atomically. The booking path itself builds plans and
//! runs them through the executor instead.

use rusqlite::TransactionBehavior;

use crate::dates::StayRange;
use crate::error::Result;
use crate::reservation::ReservationId;
use crate::room::RoomId;

use super::connection::Database;
use super::operations::{create_reservation_in, delete_reservation_in};

impl Database {
    /// Creates multiple reservations in a single transaction.
    ///
    /// This operation is atomic: either all reservations are created or
    /// none are. Returns the new ids in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction cannot be started
    /// - Any insert fails
    /// - The transaction cannot be committed
    pub fn batch_create_reservations(
        &mut self,
        entries: &[(RoomId, StayRange, String)],
    ) -> Result<Vec<ReservationId>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut ids = Vec::with_capacity(entries.len());
        for (room, stay, guest) in entries {
            ids.push(create_reservation_in(&tx, *room, *stay, guest)?);
        }

        tx.commit()?;
        Ok(ids)
    }

    /// Deletes multiple reservations in a single transaction.
    ///
    /// This operation is atomic: either all deletes apply or none do.
    /// Returns the number of reservations actually deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction cannot be started
    /// - Any delete fails
    /// - The transaction cannot be committed
    pub fn batch_delete_reservations(&mut self, ids: &[ReservationId]) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut total_deleted = 0;
        for id in ids {
            if delete_reservation_in(&tx, *id)? {
                total_deleted += 1;
            }
        }

        tx.commit()?;
        Ok(total_deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::create_test_database;
    use super::*;
    use chrono::NaiveDate;

    fn stay(start: u32, end: u32) -> StayRange {
        StayRange::new(
            NaiveDate::from_ymd_opt(2014, 7, start).unwrap(),
            NaiveDate::from_ymd_opt(2014, 7, end).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_batch_create_reservations() {
        let mut db = create_test_database();
        let hotel = db.create_hotel("Grand").unwrap();
        let double = db.create_room_type("double").unwrap();
        let room = db.create_room(hotel, double, 11).unwrap();

        let entries = vec![
            (room, stay(1, 2), "a@example.com".to_string()),
            (room, stay(2, 3), "b@example.com".to_string()),
            (room, stay(3, 4), "c@example.com".to_string()),
        ];

        let ids = db.batch_create_reservations(&entries).unwrap();
        assert_eq!(ids.len(), 3);

        let all = db.list_reservations(hotel, double).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id(), ids[0]);
    }

    #[test]
    fn test_batch_create_empty() {
        let mut db = create_test_database();
        let ids = db.batch_create_reservations(&[]).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_batch_delete_mixed() {
        let mut db = create_test_database();
        let hotel = db.create_hotel("Grand").unwrap();
        let double = db.create_room_type("double").unwrap();
        let room = db.create_room(hotel, double, 11).unwrap();

        let id = db
            .create_reservation(room, stay(1, 2), "a@example.com")
            .unwrap();

        let deleted = db
            .batch_delete_reservations(&[id, ReservationId(999)])
            .unwrap();
        assert_eq!(deleted, 1);

        let all = db.list_reservations(hotel, double).unwrap();
        assert!(all.is_empty());
    }
}
