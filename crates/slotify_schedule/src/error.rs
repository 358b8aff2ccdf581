// --- File: crates/slotify_schedule/src/error.rs ---
use slotify_common::error::HttpStatusCode;
use slotify_db::DbError;
use thiserror::Error;

/// Errors surfaced by the schedule core.
///
/// Synchronous operations return the first failure they hit and never
/// retry; background sweeps log and swallow instead of raising these.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Start time must be before end time")]
    InvalidRange,

    #[error("Per slot duration must be a multiple of 15 minutes")]
    InvalidGranularity,

    #[error("Per slot duration must be between 10 and 60 minutes")]
    DurationOutOfRange,

    #[error("Per slot duration must be less than the total duration of the day")]
    InvalidDuration,

    #[error("Day window of {total_minutes} minutes does not divide evenly into {per_slot_duration} minute slots")]
    IndivisibleWindow {
        total_minutes: i64,
        per_slot_duration: i64,
    },

    #[error("Date must be in the future")]
    PastDate,

    #[error("Failed to parse {field}: {message}")]
    TimeParse { field: &'static str, message: String },

    #[error("Schedule already exists for the given date")]
    DuplicateAvailability,

    #[error("Slot is not available")]
    SlotNotAvailable,

    #[error("You are not authorized to modify this slot")]
    NotAuthorized,

    #[error("Invalid slot ID")]
    SlotNotFound,

    #[error("Invalid host email ID")]
    HostNotFound,

    #[error("Unknown availability: {0}")]
    AvailabilityNotFound(String),

    #[error("Calendar authorization failed: {0}")]
    UpstreamAuth(String),

    #[error("Calendar booking failed: {0}")]
    UpstreamBooking(String),

    #[error("Persistence failure: {0}")]
    Database(#[from] DbError),
}

impl HttpStatusCode for ScheduleError {
    fn status_code(&self) -> u16 {
        match self {
            ScheduleError::InvalidRange
            | ScheduleError::InvalidGranularity
            | ScheduleError::DurationOutOfRange
            | ScheduleError::InvalidDuration
            | ScheduleError::IndivisibleWindow { .. }
            | ScheduleError::PastDate
            | ScheduleError::TimeParse { .. } => 400,
            ScheduleError::DuplicateAvailability | ScheduleError::SlotNotAvailable => 409,
            ScheduleError::NotAuthorized => 403,
            ScheduleError::SlotNotFound
            | ScheduleError::HostNotFound
            | ScheduleError::AvailabilityNotFound(_) => 404,
            ScheduleError::UpstreamAuth(_) | ScheduleError::UpstreamBooking(_) => 502,
            ScheduleError::Database(_) => 500,
        }
    }
}
