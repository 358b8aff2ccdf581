//! Repository trait for bookable slots

use crate::error::DbError;
use chrono::{DateTime, Utc};
use slotify_common::models::Slot;

/// Repository for bookable slots
///
/// Every cross-component mutation is status-guarded: booking, deletion and
/// the expiration sweep each execute a single conditional statement and
/// report how many rows it touched, so concurrent writers cannot both win
/// the same slot.
pub trait SlotRepository: Send + Sync {
    /// Initialize the database schema for slots.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Persist a batch of slots with a single bulk insert.
    ///
    /// No partial-insert recovery is attempted; a failure fails the whole
    /// batch and is surfaced to the caller.
    fn insert_many(
        &self,
        slots: Vec<Slot>,
    ) -> impl std::future::Future<Output = Result<Vec<Slot>, DbError>> + Send;

    /// Look up a slot by its opaque identifier.
    fn find_by_id(
        &self,
        slot_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Slot>, DbError>> + Send;

    /// All slots generated for an availability, in start-time order.
    fn find_by_availability(
        &self,
        availability_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Slot>, DbError>> + Send;

    /// Only the `booked` slots of an availability, in start-time order.
    fn find_booked_by_availability(
        &self,
        availability_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Slot>, DbError>> + Send;

    /// Delete a slot only while it is still `available`.
    ///
    /// Returns `false` when the row was absent or no longer `available`;
    /// the caller distinguishes the two with a prior lookup.
    fn delete_available(
        &self,
        slot_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Transition a slot to `booked`, guarded on it still being
    /// `available`, storing the meeting link and attendee email.
    ///
    /// Returns the updated slot, or `None` when the guard failed (the slot
    /// was booked or swept between the caller's check and this write).
    fn book_if_available(
        &self,
        slot_id: &str,
        meeting_link: &str,
        attendee_email: &str,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<Slot>, DbError>> + Send;

    /// Bulk-transition to `unavailable` every slot whose start lies before
    /// `cutoff` and whose status is `available` or `booked`. Returns the
    /// affected-row count; idempotent for a fixed `cutoff`.
    fn mark_unavailable_started_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, DbError>> + Send;
}
