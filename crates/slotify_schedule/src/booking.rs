// --- File: crates/slotify_schedule/src/booking.rs ---
//! Booking orchestration.
//!
//! Two-phase flow: `begin_booking` hands the visitor an authorization URL
//! with the slot id as opaque OAuth state; `complete_booking` runs the
//! external transaction (token exchange, event insert, event patch) and
//! commits the slot with a status-guarded update. Nothing upstream is
//! retried; any failure before the final update leaves the slot
//! `available`.

use crate::error::ScheduleError;
use crate::service::ScheduleService;
use chrono::Utc;
use slotify_common::models::{Slot, SlotStatus};
use slotify_common::services::{EventAttendee, EventDraft, EventPatch};
use slotify_db::{AvailabilityRepository, HostRepository, SlotRepository};
use tracing::{info, warn};

/// OAuth scope required to create events on the visitor's calendar.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

impl<A, S, H> ScheduleService<A, S, H>
where
    A: AvailabilityRepository,
    S: SlotRepository,
    H: HostRepository,
{
    /// Issue the authorization URL for booking a slot.
    ///
    /// Unconditional: the slot is not inspected and no state changes. A
    /// missing provider configuration is caught at startup, not here.
    pub fn begin_booking(&self, slot_id: &str) -> Result<String, ScheduleError> {
        self.calendar
            .generate_auth_url(CALENDAR_SCOPE, slot_id)
            .map_err(|e| ScheduleError::UpstreamAuth(e.to_string()))
    }

    /// Complete a booking with the authorization code from the provider
    /// redirect.
    pub async fn complete_booking(
        &self,
        code: &str,
        slot_id: &str,
    ) -> Result<Slot, ScheduleError> {
        let slot = self
            .slots
            .find_by_id(slot_id)
            .await?
            .ok_or(ScheduleError::SlotNotFound)?;

        // Gate before any upstream traffic: a slot that is already booked
        // or swept must not cause calendar calls.
        if slot.status != SlotStatus::Available {
            return Err(ScheduleError::SlotNotAvailable);
        }

        let tokens = self
            .calendar
            .exchange_code(code)
            .await
            .map_err(|e| ScheduleError::UpstreamAuth(e.to_string()))?;

        let availability = self
            .availabilities
            .find_by_id(&slot.availability_id)
            .await?
            .ok_or_else(|| ScheduleError::AvailabilityNotFound(slot.availability_id.clone()))?;
        let host = self
            .hosts
            .find_by_email(&availability.host_email)
            .await?
            .ok_or(ScheduleError::HostNotFound)?;

        let draft = EventDraft {
            start_time: slot.slot_start_time.to_rfc3339(),
            end_time: slot.slot_end_time.to_rfc3339(),
            time_zone: self.settings.time_zone.name().to_string(),
            summary: Some(availability.title.clone()),
            description: Some(format!("Meeting with {}", host.name)),
            location: Some("Virtual / Google Meet".to_string()),
            request_conference_link: true,
        };
        let created = self
            .calendar
            .create_event(&self.settings.calendar_id, &tokens, draft)
            .await
            .map_err(|e| ScheduleError::UpstreamBooking(e.to_string()))?;

        let meeting_link = created
            .hangout_link
            .clone()
            .ok_or_else(|| ScheduleError::UpstreamBooking("no meeting link generated".into()))?;
        let attendee_email = created.creator_email.clone().ok_or_else(|| {
            ScheduleError::UpstreamBooking("provider did not identify the event creator".into())
        })?;

        let patch = EventPatch {
            summary: Some(format!("{} {}", availability.title, attendee_email)),
            location: Some(meeting_link.clone()),
            attendees: vec![
                EventAttendee {
                    display_name: Some(host.name.clone()),
                    email: availability.host_email.clone(),
                    organizer: true,
                },
                EventAttendee {
                    display_name: created.creator_display_name.clone(),
                    email: attendee_email.clone(),
                    organizer: false,
                },
            ],
        };
        self.calendar
            .patch_event(&self.settings.calendar_id, &tokens, &created.event_id, patch)
            .await
            .map_err(|e| ScheduleError::UpstreamBooking(e.to_string()))?;

        // Status-guarded commit: if a concurrent booking or sweep got here
        // first, zero rows are affected and the caller sees a conflict.
        let booked = self
            .slots
            .book_if_available(slot_id, &meeting_link, &attendee_email, Utc::now())
            .await?;

        match booked {
            Some(slot) => {
                info!("Booked slot {} for {}", slot_id, attendee_email);
                Ok(slot)
            }
            None => {
                warn!(
                    "Slot {} was taken between the availability check and the commit",
                    slot_id
                );
                Err(ScheduleError::SlotNotAvailable)
            }
        }
    }
}
