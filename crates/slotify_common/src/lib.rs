// --- File: crates/slotify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error taxonomy shared across crates
pub mod logging; // Logging utilities
pub mod models; // Domain models (Availability, Slot, Host)
pub mod services; // Service abstractions (calendar capability)
pub mod time; // Storage timestamp formatting

// Re-export error types and utilities for easier access
pub use error::{HttpStatusCode, SlotifyError};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// Re-export the most commonly used model types
pub use models::{Availability, AvailabilityStatus, Host, Slot, SlotStatus};
