//! Repository trait for availability windows

use crate::error::DbError;
use chrono::{DateTime, Utc};
use slotify_common::models::Availability;

/// Repository for availability windows
///
/// Availabilities are append-only from the application's point of view:
/// they are created once, read for lookups, and only ever mutated by the
/// expiration sweep (`active` → `inactive`). There is no delete.
pub trait AvailabilityRepository: Send + Sync {
    /// Initialize the database schema for availabilities.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Persist a new availability.
    fn create(
        &self,
        availability: Availability,
    ) -> impl std::future::Future<Output = Result<Availability, DbError>> + Send;

    /// Look up an availability by its opaque identifier.
    fn find_by_id(
        &self,
        availability_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Availability>, DbError>> + Send;

    /// All availabilities declared by a host, newest date first.
    fn find_by_host(
        &self,
        host_email: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Availability>, DbError>> + Send;

    /// Whether any availability already exists for (host, date).
    ///
    /// Backs the duplicate check of the validator; inactive rows count too,
    /// matching the one-availability-per-day rule.
    fn exists_for_host_date(
        &self,
        host_email: &str,
        date: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Bulk-transition to `inactive` every `active` availability whose day
    /// start lies before `cutoff`. Returns the affected-row count; running
    /// the same transition twice is a no-op.
    fn mark_inactive_started_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, DbError>> + Send;
}
