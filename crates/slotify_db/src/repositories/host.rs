//! Repository trait for host records

use crate::error::DbError;
use slotify_common::models::Host;

/// Repository for host records
///
/// Hosts are registered upstream; this service only needs existence checks
/// and the display name/email for calendar attendees. `create` exists for
/// seeding and tests.
pub trait HostRepository: Send + Sync {
    /// Initialize the database schema for hosts.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Persist a host record.
    fn create(&self, host: Host) -> impl std::future::Future<Output = Result<Host, DbError>> + Send;

    /// Whether a host with this email exists.
    fn exists(&self, email: &str)
        -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Look up a host by email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Host>, DbError>> + Send;
}
