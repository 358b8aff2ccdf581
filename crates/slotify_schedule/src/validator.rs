// --- File: crates/slotify_schedule/src/validator.rs ---
//! Availability request validation.
//!
//! Resolves the host's wall-clock input into absolute instants in the
//! service's configured time zone and enforces the business rules in a
//! fixed order. The only side effect is the duplicate-check repository
//! read; every failure is surfaced to the caller, nothing is retried.

use crate::error::ScheduleError;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slotify_db::AvailabilityRepository;

/// Slot durations must align to this grid.
pub const SLOT_GRANULARITY_MINUTES: i64 = 15;
/// Smallest accepted per-slot duration.
pub const MIN_SLOT_DURATION_MINUTES: i64 = 10;
/// Largest accepted per-slot duration.
pub const MAX_SLOT_DURATION_MINUTES: i64 = 60;

/// A host's raw request to open a window of availability.
///
/// `date` is `YYYY-MM-DD`; the day times are `HH:MM` wall clock in the
/// service time zone. The host identity arrives separately (verified
/// upstream) and is never part of the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAvailabilityRequest {
    pub title: String,
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2026-09-01"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub day_start_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "17:00"))]
    pub day_end_time: String,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub per_slot_duration: i64,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub metadata: Option<serde_json::Value>,
}

/// A validated, canonicalized availability request.
#[derive(Debug, Clone)]
pub struct ValidatedAvailability {
    pub title: String,
    pub date: String,
    pub day_start_time: DateTime<Utc>,
    pub day_end_time: DateTime<Utc>,
    pub per_slot_duration: i64,
    pub metadata: Option<serde_json::Value>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| ScheduleError::TimeParse {
        field: "date",
        message: e.to_string(),
    })
}

fn parse_wall_clock(field: &'static str, raw: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|e| ScheduleError::TimeParse {
        field,
        message: e.to_string(),
    })
}

/// Anchors a wall-clock time on a date in `tz` and converts to UTC.
///
/// DST transitions can make a local time ambiguous or nonexistent; both
/// cases are reported back to the host rather than silently picking a side.
fn resolve_local(
    field: &'static str,
    date: NaiveDate,
    time: NaiveTime,
    tz: Tz,
) -> Result<DateTime<Utc>, ScheduleError> {
    tz.from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(ScheduleError::TimeParse {
            field,
            message: format!("{time} is ambiguous or does not exist on {date} in {tz}"),
        })
}

/// Validates an availability request against the rules of the schedule
/// core, in order: range, granularity, duration bounds, divisibility,
/// past-date, duplicate.
pub async fn validate_availability_request<A>(
    availabilities: &A,
    tz: Tz,
    host_email: &str,
    request: &CreateAvailabilityRequest,
    now: DateTime<Utc>,
) -> Result<ValidatedAvailability, ScheduleError>
where
    A: AvailabilityRepository,
{
    let date = parse_date(&request.date)?;
    let start_wall = parse_wall_clock("day_start_time", &request.day_start_time)?;
    let end_wall = parse_wall_clock("day_end_time", &request.day_end_time)?;

    let day_start_time = resolve_local("day_start_time", date, start_wall, tz)?;
    let day_end_time = resolve_local("day_end_time", date, end_wall, tz)?;

    if day_start_time >= day_end_time {
        return Err(ScheduleError::InvalidRange);
    }

    if request.per_slot_duration % SLOT_GRANULARITY_MINUTES != 0 {
        return Err(ScheduleError::InvalidGranularity);
    }

    if request.per_slot_duration < MIN_SLOT_DURATION_MINUTES
        || request.per_slot_duration > MAX_SLOT_DURATION_MINUTES
    {
        return Err(ScheduleError::DurationOutOfRange);
    }

    let total_minutes = (day_end_time - day_start_time).num_minutes();
    if request.per_slot_duration > total_minutes {
        return Err(ScheduleError::InvalidDuration);
    }

    // Remainder policy: a window that does not divide evenly is rejected
    // outright instead of silently dropping the trailing minutes.
    if total_minutes % request.per_slot_duration != 0 {
        return Err(ScheduleError::IndivisibleWindow {
            total_minutes,
            per_slot_duration: request.per_slot_duration,
        });
    }

    if day_start_time < now {
        return Err(ScheduleError::PastDate);
    }

    if availabilities
        .exists_for_host_date(host_email, &request.date)
        .await?
    {
        return Err(ScheduleError::DuplicateAvailability);
    }

    Ok(ValidatedAvailability {
        title: request.title.clone(),
        date: request.date.clone(),
        day_start_time,
        day_end_time,
        per_slot_duration: request.per_slot_duration,
        metadata: request.metadata.clone(),
    })
}
