//! Pure allocation logic over inventory snapshots.
//!
//! Everything in this module is side-effect free: the functions take
//! rooms and reservations as slices and return decisions. The operations
//! layer is responsible for snapshotting the database, holding the scope
//! locks, and persisting the results.

pub mod inventory;
pub mod partition;
pub mod scorer;

pub use inventory::free_rooms;
pub use partition::{plan_rearrangement, SlotAssignment};
pub use scorer::{busyness, choose_best_room};
