//! Database integration for Slotify
//!
//! Provides a database-agnostic client over a SQLx `Any` pool (SQLite by
//! default, PostgreSQL and MySQL behind feature flags) plus the per-entity
//! repositories the schedule core consumes. Repositories are composed from
//! an injected [`DbClient`] rather than inheriting from a shared base.

pub mod client;
pub mod error;
pub mod repositories;

// Register the SQLite driver when the crate is loaded
#[cfg(feature = "sqlite")]
mod sqlite_driver {
    // This import ensures the SQLite driver is linked and registered
    #[allow(unused_imports)]
    use sqlx::sqlite::SqlitePoolOptions as _;
}

pub use client::DbClient;
pub use error::DbError;

pub use repositories::{
    AvailabilityRepository, HostRepository, SlotRepository, SqlAvailabilityRepository,
    SqlHostRepository, SqlSlotRepository,
};
