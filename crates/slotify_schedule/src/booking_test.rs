#[cfg(test)]
mod tests {
    use crate::error::ScheduleError;
    use crate::test_support::{
        availability_row, fixture, host, slot_row, FAKE_MEETING_LINK, FAKE_VISITOR_EMAIL,
    };
    use chrono::{TimeZone, Utc};
    use slotify_common::models::SlotStatus;
    use std::sync::atomic::Ordering;

    fn future_start() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 9, 1, 3, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn begin_booking_embeds_slot_id_and_touches_nothing() {
        let f = fixture();
        let start = future_start();
        let slot = slot_row("avl1", start, SlotStatus::Available);
        let slot_id = slot.slot_id.clone();
        f.slots.rows.lock().unwrap().push(slot);

        let url = f.service.begin_booking(&slot_id).unwrap();

        assert!(url.contains(&format!("state={slot_id}")));
        assert!(url.contains("googleapis.com%2Fauth%2Fcalendar") || url.contains("auth/calendar"));
        assert_eq!(
            f.slots.rows.lock().unwrap()[0].status,
            SlotStatus::Available
        );
        assert_eq!(f.calendar.exchange_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn complete_booking_books_slot_and_stores_meeting_link() {
        let f = fixture();
        let start = future_start();
        let availability = availability_row("host@example.com", "2030-09-01", start);
        let availability_id = availability.availability_id.clone();
        let slot = slot_row(&availability_id, start, SlotStatus::Available);
        let slot_id = slot.slot_id.clone();

        f.hosts
            .rows
            .lock()
            .unwrap()
            .push(host("host@example.com", "Dana Host"));
        f.availabilities.rows.lock().unwrap().push(availability);
        f.slots.rows.lock().unwrap().push(slot);

        let booked = f.service.complete_booking("auth-code", &slot_id).await.unwrap();

        assert_eq!(booked.status, SlotStatus::Booked);
        assert_eq!(booked.meeting_link.as_deref(), Some(FAKE_MEETING_LINK));
        assert_eq!(booked.attendee_email.as_deref(), Some(FAKE_VISITOR_EMAIL));

        // one exchange, one insert, one patch
        assert_eq!(f.calendar.exchange_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.calendar.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.calendar.patch_calls.load(Ordering::SeqCst), 1);

        // the patch pinned the link as location and attached both parties
        let patch = f.calendar.last_patch.lock().unwrap().clone().unwrap();
        assert_eq!(patch.location.as_deref(), Some(FAKE_MEETING_LINK));
        assert_eq!(
            patch.summary.as_deref(),
            Some(format!("Office hours {FAKE_VISITOR_EMAIL}").as_str())
        );
        assert_eq!(patch.attendees.len(), 2);
        assert!(patch
            .attendees
            .iter()
            .any(|a| a.email == "host@example.com" && a.organizer));
        assert!(patch
            .attendees
            .iter()
            .any(|a| a.email == FAKE_VISITOR_EMAIL && !a.organizer));

        // the store saw the same transition
        let stored = f.slots.rows.lock().unwrap()[0].clone();
        assert_eq!(stored.status, SlotStatus::Booked);
    }

    #[tokio::test]
    async fn unknown_slot_fails_before_any_upstream_call() {
        let f = fixture();

        let err = f
            .service
            .complete_booking("auth-code", "slot-missing")
            .await
            .unwrap_err();

        assert!(matches!(err, ScheduleError::SlotNotFound));
        assert_eq!(f.calendar.exchange_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_available_slot_fails_before_any_upstream_call() {
        let f = fixture();
        let start = future_start();

        for status in [SlotStatus::Booked, SlotStatus::Unavailable] {
            let slot = slot_row("avl1", start, status);
            let slot_id = slot.slot_id.clone();
            f.slots.rows.lock().unwrap().push(slot);

            let err = f
                .service
                .complete_booking("auth-code", &slot_id)
                .await
                .unwrap_err();
            assert!(matches!(err, ScheduleError::SlotNotAvailable));
        }

        assert_eq!(f.calendar.exchange_calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.calendar.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_code_exchange_leaves_slot_available() {
        let f = fixture();
        let start = future_start();
        let availability = availability_row("host@example.com", "2030-09-01", start);
        let slot = slot_row(&availability.availability_id, start, SlotStatus::Available);
        let slot_id = slot.slot_id.clone();
        f.hosts
            .rows
            .lock()
            .unwrap()
            .push(host("host@example.com", "Dana Host"));
        f.availabilities.rows.lock().unwrap().push(availability);
        f.slots.rows.lock().unwrap().push(slot);
        f.calendar.fail_exchange.store(true, Ordering::SeqCst);

        let err = f
            .service
            .complete_booking("auth-code", &slot_id)
            .await
            .unwrap_err();

        assert!(matches!(err, ScheduleError::UpstreamAuth(_)));
        assert_eq!(f.calendar.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            f.slots.rows.lock().unwrap()[0].status,
            SlotStatus::Available
        );
    }

    #[tokio::test]
    async fn failed_event_creation_leaves_slot_available() {
        let f = fixture();
        let start = future_start();
        let availability = availability_row("host@example.com", "2030-09-01", start);
        let slot = slot_row(&availability.availability_id, start, SlotStatus::Available);
        let slot_id = slot.slot_id.clone();
        f.hosts
            .rows
            .lock()
            .unwrap()
            .push(host("host@example.com", "Dana Host"));
        f.availabilities.rows.lock().unwrap().push(availability);
        f.slots.rows.lock().unwrap().push(slot);
        f.calendar.fail_create.store(true, Ordering::SeqCst);

        let err = f
            .service
            .complete_booking("auth-code", &slot_id)
            .await
            .unwrap_err();

        assert!(matches!(err, ScheduleError::UpstreamBooking(_)));
        assert_eq!(f.calendar.patch_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            f.slots.rows.lock().unwrap()[0].status,
            SlotStatus::Available
        );
    }

    #[tokio::test]
    async fn losing_the_commit_race_is_a_conflict() {
        let f = fixture();
        let start = future_start();
        let availability = availability_row("host@example.com", "2030-09-01", start);
        let slot = slot_row(&availability.availability_id, start, SlotStatus::Available);
        let slot_id = slot.slot_id.clone();
        f.hosts
            .rows
            .lock()
            .unwrap()
            .push(host("host@example.com", "Dana Host"));
        f.availabilities.rows.lock().unwrap().push(availability);
        f.slots.rows.lock().unwrap().push(slot);

        // Another writer takes the slot between the check and the commit
        f.slots.deny_book_guard.store(true, Ordering::SeqCst);

        let err = f
            .service
            .complete_booking("auth-code", &slot_id)
            .await
            .unwrap_err();

        assert!(matches!(err, ScheduleError::SlotNotAvailable));
    }
}
