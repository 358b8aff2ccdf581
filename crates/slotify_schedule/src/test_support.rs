//! In-memory fakes for exercising the schedule core without a database or
//! a calendar provider.

use crate::service::{ScheduleService, ScheduleSettings};
use chrono::{DateTime, Duration, TimeZone, Utc};
use slotify_common::models::{
    new_availability_id, new_slot_id, Availability, AvailabilityStatus, Host, Slot, SlotStatus,
};
use slotify_common::services::{
    BoxFuture, BoxedError, CalendarClient, CreatedEvent, EventDraft, EventPatch, OAuthTokens,
};
use slotify_db::{AvailabilityRepository, DbError, HostRepository, SlotRepository};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct InMemoryAvailabilityRepository {
    pub rows: Arc<Mutex<Vec<Availability>>>,
}

impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create(&self, availability: Availability) -> Result<Availability, DbError> {
        self.rows.lock().unwrap().push(availability.clone());
        Ok(availability)
    }

    async fn find_by_id(&self, availability_id: &str) -> Result<Option<Availability>, DbError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.availability_id == availability_id)
            .cloned())
    }

    async fn find_by_host(&self, host_email: &str) -> Result<Vec<Availability>, DbError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.host_email == host_email)
            .cloned()
            .collect())
    }

    async fn exists_for_host_date(&self, host_email: &str, date: &str) -> Result<bool, DbError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.host_email == host_email && a.date == date))
    }

    async fn mark_inactive_started_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<u64, DbError> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for availability in rows.iter_mut() {
            if availability.day_start_time < cutoff
                && availability.status == AvailabilityStatus::Active
            {
                availability.status = AvailabilityStatus::Inactive;
                availability.updated_at = now;
                affected += 1;
            }
        }
        Ok(affected)
    }
}

#[derive(Clone, Default)]
pub struct InMemorySlotRepository {
    pub rows: Arc<Mutex<Vec<Slot>>>,
    /// Forces `book_if_available` to report a lost guard, simulating a
    /// concurrent booking or sweep landing first.
    pub deny_book_guard: Arc<AtomicBool>,
}

impl SlotRepository for InMemorySlotRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn insert_many(&self, slots: Vec<Slot>) -> Result<Vec<Slot>, DbError> {
        self.rows.lock().unwrap().extend(slots.iter().cloned());
        Ok(slots)
    }

    async fn find_by_id(&self, slot_id: &str) -> Result<Option<Slot>, DbError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.slot_id == slot_id)
            .cloned())
    }

    async fn find_by_availability(&self, availability_id: &str) -> Result<Vec<Slot>, DbError> {
        let mut slots: Vec<Slot> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.availability_id == availability_id)
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.slot_start_time);
        Ok(slots)
    }

    async fn find_booked_by_availability(
        &self,
        availability_id: &str,
    ) -> Result<Vec<Slot>, DbError> {
        let mut slots: Vec<Slot> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.availability_id == availability_id && s.status == SlotStatus::Booked)
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.slot_start_time);
        Ok(slots)
    }

    async fn delete_available(&self, slot_id: &str) -> Result<bool, DbError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| !(s.slot_id == slot_id && s.status == SlotStatus::Available));
        Ok(rows.len() < before)
    }

    async fn book_if_available(
        &self,
        slot_id: &str,
        meeting_link: &str,
        attendee_email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Slot>, DbError> {
        if self.deny_book_guard.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let mut rows = self.rows.lock().unwrap();
        for slot in rows.iter_mut() {
            if slot.slot_id == slot_id && slot.status == SlotStatus::Available {
                slot.status = SlotStatus::Booked;
                slot.meeting_link = Some(meeting_link.to_string());
                slot.attendee_email = Some(attendee_email.to_string());
                slot.updated_at = now;
                return Ok(Some(slot.clone()));
            }
        }
        Ok(None)
    }

    async fn mark_unavailable_started_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<u64, DbError> {
        let mut rows = self.rows.lock().unwrap();
        let mut affected = 0;
        for slot in rows.iter_mut() {
            if slot.slot_start_time < cutoff
                && matches!(slot.status, SlotStatus::Available | SlotStatus::Booked)
            {
                slot.status = SlotStatus::Unavailable;
                slot.updated_at = now;
                affected += 1;
            }
        }
        Ok(affected)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryHostRepository {
    pub rows: Arc<Mutex<Vec<Host>>>,
}

impl HostRepository for InMemoryHostRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn create(&self, host: Host) -> Result<Host, DbError> {
        self.rows.lock().unwrap().push(host.clone());
        Ok(host)
    }

    async fn exists(&self, email: &str) -> Result<bool, DbError> {
        Ok(self.rows.lock().unwrap().iter().any(|h| h.email == email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Host>, DbError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.email == email)
            .cloned())
    }
}

/// Deterministic calendar client: fixed link, fixed creator, call counts.
#[derive(Clone, Default)]
pub struct FakeCalendarClient {
    pub exchange_calls: Arc<AtomicUsize>,
    pub create_calls: Arc<AtomicUsize>,
    pub patch_calls: Arc<AtomicUsize>,
    pub fail_exchange: Arc<AtomicBool>,
    pub fail_create: Arc<AtomicBool>,
    pub last_patch: Arc<Mutex<Option<EventPatch>>>,
}

pub const FAKE_MEETING_LINK: &str = "https://meet.google.com/fake-link";
pub const FAKE_VISITOR_EMAIL: &str = "visitor@example.com";

fn fake_failure(message: &str) -> BoxedError {
    BoxedError(message.to_string().into())
}

impl CalendarClient for FakeCalendarClient {
    type Error = BoxedError;

    fn generate_auth_url(&self, scope: &str, state: &str) -> Result<String, Self::Error> {
        Ok(format!(
            "https://auth.example.com/consent?scope={scope}&state={state}"
        ))
    }

    fn exchange_code(&self, _code: &str) -> BoxFuture<'_, OAuthTokens, Self::Error> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail_exchange.load(Ordering::SeqCst);

        Box::pin(async move {
            if fail {
                return Err(fake_failure("invalid_grant"));
            }
            Ok(OAuthTokens {
                access_token: "fake-access-token".to_string(),
                refresh_token: None,
            })
        })
    }

    fn create_event(
        &self,
        _calendar_id: &str,
        _tokens: &OAuthTokens,
        _draft: EventDraft,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail_create.load(Ordering::SeqCst);

        Box::pin(async move {
            if fail {
                return Err(fake_failure("calendar insert failed"));
            }
            Ok(CreatedEvent {
                event_id: "evt-1".to_string(),
                hangout_link: Some(FAKE_MEETING_LINK.to_string()),
                creator_email: Some(FAKE_VISITOR_EMAIL.to_string()),
                creator_display_name: Some("Visitor".to_string()),
                status: "confirmed".to_string(),
            })
        })
    }

    fn patch_event(
        &self,
        _calendar_id: &str,
        _tokens: &OAuthTokens,
        event_id: &str,
        patch: EventPatch,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        self.patch_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_patch.lock().unwrap() = Some(patch.clone());
        let event_id = event_id.to_string();

        Box::pin(async move {
            Ok(CreatedEvent {
                event_id,
                hangout_link: Some(FAKE_MEETING_LINK.to_string()),
                creator_email: Some(FAKE_VISITOR_EMAIL.to_string()),
                creator_display_name: Some("Visitor".to_string()),
                status: "confirmed".to_string(),
            })
        })
    }
}

pub type FakeScheduleService =
    ScheduleService<InMemoryAvailabilityRepository, InMemorySlotRepository, InMemoryHostRepository>;

pub struct Fixture {
    pub availabilities: InMemoryAvailabilityRepository,
    pub slots: InMemorySlotRepository,
    pub hosts: InMemoryHostRepository,
    pub calendar: FakeCalendarClient,
    pub service: FakeScheduleService,
}

pub fn fixture() -> Fixture {
    let availabilities = InMemoryAvailabilityRepository::default();
    let slots = InMemorySlotRepository::default();
    let hosts = InMemoryHostRepository::default();
    let calendar = FakeCalendarClient::default();

    let service = ScheduleService::new(
        availabilities.clone(),
        slots.clone(),
        hosts.clone(),
        Arc::new(calendar.clone()),
        ScheduleSettings {
            time_zone: chrono_tz::Asia::Kolkata,
            calendar_id: "primary".to_string(),
        },
    );

    Fixture {
        availabilities,
        slots,
        hosts,
        calendar,
        service,
    }
}

pub fn host(email: &str, name: &str) -> Host {
    Host {
        email: email.to_string(),
        name: name.to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn availability_row(host_email: &str, date: &str, start: DateTime<Utc>) -> Availability {
    Availability {
        availability_id: new_availability_id(),
        host_email: host_email.to_string(),
        title: "Office hours".to_string(),
        date: date.to_string(),
        day_start_time: start,
        day_end_time: start + Duration::hours(2),
        per_slot_duration: 30,
        status: AvailabilityStatus::Active,
        created_at: start - Duration::days(7),
        updated_at: start - Duration::days(7),
        metadata: None,
    }
}

pub fn slot_row(availability_id: &str, start: DateTime<Utc>, status: SlotStatus) -> Slot {
    Slot {
        slot_id: new_slot_id(),
        availability_id: availability_id.to_string(),
        slot_start_time: start,
        slot_end_time: start + Duration::minutes(30),
        status,
        meeting_link: None,
        attendee_email: None,
        created_at: start - Duration::days(7),
        updated_at: start - Duration::days(7),
        metadata: None,
    }
}
