// --- File: crates/slotify_common/src/models.rs ---

// Domain models shared across the application: the availability/slot pair
// that the schedule core operates on, and the minimal host record needed
// for booking and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of an availability window.
///
/// `Active` availabilities are bookable; the sweeper flips them to
/// `Inactive` once their date has passed. Availabilities are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Active,
    Inactive,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Active => "active",
            AvailabilityStatus::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AvailabilityStatus::Active),
            "inactive" => Ok(AvailabilityStatus::Inactive),
            other => Err(format!("unknown availability status: {other}")),
        }
    }
}

/// Lifecycle status of a bookable slot.
///
/// A slot starts `Available`. Booking transitions it to `Booked`, the
/// sweeper transitions elapsed slots to `Unavailable`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
    Unavailable,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::Booked => "booked",
            SlotStatus::Unavailable => "unavailable",
        }
    }
}

impl std::str::FromStr for SlotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(SlotStatus::Available),
            "booked" => Ok(SlotStatus::Booked),
            "unavailable" => Ok(SlotStatus::Unavailable),
            other => Err(format!("unknown slot status: {other}")),
        }
    }
}

/// A host-declared bookable window on a specific date.
///
/// `day_start_time`/`day_end_time` are absolute instants, resolved from the
/// host's wall-clock input in the service's configured time zone. Exactly
/// one `active` availability may exist per (host, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Availability {
    pub availability_id: String,
    pub host_email: String,
    pub title: String,
    /// Calendar date in YYYY-MM-DD form
    pub date: String,
    pub day_start_time: DateTime<Utc>,
    pub day_end_time: DateTime<Utc>,
    /// Minutes per generated slot; multiple of 15, within [10, 60]
    pub per_slot_duration: i64,
    pub status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub metadata: Option<serde_json::Value>,
}

/// One bookable sub-interval of an availability.
///
/// References its availability by id only; slot lifetime is independent of
/// the availability's (no cascade delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Slot {
    pub slot_id: String,
    pub availability_id: String,
    pub slot_start_time: DateTime<Utc>,
    pub slot_end_time: DateTime<Utc>,
    pub status: SlotStatus,
    pub meeting_link: Option<String>,
    pub attendee_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub metadata: Option<serde_json::Value>,
}

/// Minimal host record: display name and email for calendar attendees.
///
/// Registration and credentials live upstream; this service only looks
/// hosts up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Host {
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Generates an opaque, unguessable availability identifier.
pub fn new_availability_id() -> String {
    format!("avl{}", Uuid::new_v4().simple())
}

/// Generates an opaque, unguessable slot identifier.
pub fn new_slot_id() -> String {
    format!("slot{}", Uuid::new_v4().simple())
}
