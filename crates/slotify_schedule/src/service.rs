// --- File: crates/slotify_schedule/src/service.rs ---
//! The schedule service: availability creation, slot deletion and listings.
//!
//! Booking orchestration lives in [`crate::booking`] as a second impl
//! block on the same service; the expiration sweep is a separate
//! component ([`crate::sweeper`]).

use crate::error::ScheduleError;
use crate::partitioner::partition_into_slots;
use crate::validator::{validate_availability_request, CreateAvailabilityRequest};
use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;
use slotify_common::models::{new_availability_id, Availability, AvailabilityStatus, Slot};
use slotify_common::services::{BoxedError, CalendarClient};
use slotify_db::{AvailabilityRepository, HostRepository, SlotRepository};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

/// Settings the schedule core needs at runtime.
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    /// The single zone all wall-clock inputs are resolved in
    pub time_zone: Tz,
    /// Calendar events are created in this provider calendar
    pub calendar_id: String,
}

/// The schedule service, generic over its repositories so tests can
/// substitute in-memory fakes. The calendar provider is injected as a
/// trait object for the same reason.
pub struct ScheduleService<A, S, H> {
    pub(crate) availabilities: A,
    pub(crate) slots: S,
    pub(crate) hosts: H,
    pub(crate) calendar: Arc<dyn CalendarClient<Error = BoxedError>>,
    pub(crate) settings: ScheduleSettings,
}

/// Result of creating a schedule: the availability plus its slot batch.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreatedSchedule {
    pub availability: Availability,
    pub slots: Vec<Slot>,
}

impl<A, S, H> ScheduleService<A, S, H>
where
    A: AvailabilityRepository,
    S: SlotRepository,
    H: HostRepository,
{
    pub fn new(
        availabilities: A,
        slots: S,
        hosts: H,
        calendar: Arc<dyn CalendarClient<Error = BoxedError>>,
        settings: ScheduleSettings,
    ) -> Self {
        Self {
            availabilities,
            slots,
            hosts,
            calendar,
            settings,
        }
    }

    /// Create an availability window and its generated slots.
    ///
    /// The availability row lands first, then the slot batch in one bulk
    /// insert. There is no compensating delete: a bulk-insert failure
    /// leaves the availability without slots, which is logged and surfaced
    /// to the caller rather than hidden.
    pub async fn create_schedule(
        &self,
        host_email: &str,
        request: CreateAvailabilityRequest,
    ) -> Result<CreatedSchedule, ScheduleError> {
        let now = Utc::now();
        let validated = validate_availability_request(
            &self.availabilities,
            self.settings.time_zone,
            host_email,
            &request,
            now,
        )
        .await?;

        let availability = Availability {
            availability_id: new_availability_id(),
            host_email: host_email.to_string(),
            title: validated.title,
            date: validated.date,
            day_start_time: validated.day_start_time,
            day_end_time: validated.day_end_time,
            per_slot_duration: validated.per_slot_duration,
            status: AvailabilityStatus::Active,
            created_at: now,
            updated_at: now,
            metadata: validated.metadata,
        };
        let availability = self.availabilities.create(availability).await?;

        let drafts = partition_into_slots(
            &availability.availability_id,
            availability.day_start_time,
            availability.day_end_time,
            availability.per_slot_duration,
            now,
        );

        let slots = match self.slots.insert_many(drafts).await {
            Ok(slots) => slots,
            Err(e) => {
                error!(
                    "Slot bulk insert failed; availability {} is left without slots: {}",
                    availability.availability_id, e
                );
                return Err(e.into());
            }
        };

        info!(
            "Created availability {} with {} slots for {}",
            availability.availability_id,
            slots.len(),
            availability.host_email
        );

        Ok(CreatedSchedule {
            availability,
            slots,
        })
    }

    /// Delete a slot while it is still `available`, on behalf of the host
    /// that owns the parent availability.
    pub async fn delete_slot(&self, slot_id: &str, host_email: &str) -> Result<(), ScheduleError> {
        let slot = self
            .slots
            .find_by_id(slot_id)
            .await?
            .ok_or(ScheduleError::SlotNotFound)?;

        if slot.status != slotify_common::models::SlotStatus::Available {
            return Err(ScheduleError::SlotNotAvailable);
        }

        let availability = self
            .availabilities
            .find_by_id(&slot.availability_id)
            .await?
            .ok_or_else(|| ScheduleError::AvailabilityNotFound(slot.availability_id.clone()))?;

        if availability.host_email != host_email {
            return Err(ScheduleError::NotAuthorized);
        }

        // The delete itself is status-guarded; a booking or sweep landing
        // between the check above and here shows up as zero rows.
        if !self.slots.delete_available(slot_id).await? {
            return Err(ScheduleError::SlotNotAvailable);
        }

        info!("Deleted slot {} for host {}", slot_id, host_email);
        Ok(())
    }

    /// All of a host's availabilities as a `date -> slots` mapping.
    pub async fn get_availabilities(
        &self,
        host_email: &str,
    ) -> Result<BTreeMap<String, Vec<Slot>>, ScheduleError> {
        if !self.hosts.exists(host_email).await? {
            return Err(ScheduleError::HostNotFound);
        }

        let mut by_date = BTreeMap::new();
        for availability in self.availabilities.find_by_host(host_email).await? {
            let slots = self
                .slots
                .find_by_availability(&availability.availability_id)
                .await?;
            by_date.insert(availability.date, slots);
        }

        Ok(by_date)
    }

    /// Every `booked` slot across the host's availabilities, soonest first.
    pub async fn get_booked_slots(&self, host_email: &str) -> Result<Vec<Slot>, ScheduleError> {
        if !self.hosts.exists(host_email).await? {
            return Err(ScheduleError::HostNotFound);
        }

        let mut booked = Vec::new();
        for availability in self.availabilities.find_by_host(host_email).await? {
            booked.extend(
                self.slots
                    .find_booked_by_availability(&availability.availability_id)
                    .await?,
            );
        }
        booked.sort_by_key(|slot| slot.slot_start_time);

        Ok(booked)
    }
}
