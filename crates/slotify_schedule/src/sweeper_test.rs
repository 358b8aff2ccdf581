#[cfg(test)]
mod tests {
    use crate::sweeper::{duration_until_next_occurrence, ExpirationSweeper};
    use crate::test_support::{availability_row, slot_row, InMemoryAvailabilityRepository, InMemorySlotRepository};
    use chrono::{Duration, NaiveTime, TimeZone, Utc};
    use slotify_common::models::{AvailabilityStatus, SlotStatus};

    #[tokio::test]
    async fn slot_sweep_reclaims_elapsed_actionable_slots_only() {
        let availabilities = InMemoryAvailabilityRepository::default();
        let slots = InMemorySlotRepository::default();
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();

        {
            let mut rows = slots.rows.lock().unwrap();
            rows.push(slot_row("avl1", now - Duration::hours(3), SlotStatus::Available));
            rows.push(slot_row("avl1", now - Duration::hours(1), SlotStatus::Booked));
            rows.push(slot_row(
                "avl1",
                now - Duration::hours(2),
                SlotStatus::Unavailable,
            ));
            rows.push(slot_row("avl1", now + Duration::hours(1), SlotStatus::Available));
        }

        let sweeper = ExpirationSweeper::new(availabilities, slots.clone());
        let affected = sweeper.sweep_slots_once(now).await;
        assert_eq!(affected, 2);

        let rows = slots.rows.lock().unwrap().clone();
        assert_eq!(rows[0].status, SlotStatus::Unavailable);
        assert_eq!(rows[0].updated_at, now);
        assert_eq!(rows[1].status, SlotStatus::Unavailable);
        // already-unavailable slot untouched
        assert_ne!(rows[2].updated_at, now);
        // future slot untouched
        assert_eq!(rows[3].status, SlotStatus::Available);
    }

    #[tokio::test]
    async fn slot_sweep_is_idempotent_at_a_fixed_instant() {
        let availabilities = InMemoryAvailabilityRepository::default();
        let slots = InMemorySlotRepository::default();
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
        slots
            .rows
            .lock()
            .unwrap()
            .push(slot_row("avl1", now - Duration::hours(1), SlotStatus::Available));

        let sweeper = ExpirationSweeper::new(availabilities, slots.clone());
        assert_eq!(sweeper.sweep_slots_once(now).await, 1);
        let after_first = slots.rows.lock().unwrap().clone();

        assert_eq!(sweeper.sweep_slots_once(now).await, 0);
        let after_second = slots.rows.lock().unwrap().clone();

        assert_eq!(after_first[0].status, after_second[0].status);
        assert_eq!(after_first[0].updated_at, after_second[0].updated_at);
    }

    #[tokio::test]
    async fn availability_sweep_deactivates_started_windows() {
        let availabilities = InMemoryAvailabilityRepository::default();
        let slots = InMemorySlotRepository::default();
        let now = Utc.with_ymd_and_hms(2026, 9, 2, 18, 29, 0).unwrap();

        {
            let mut rows = availabilities.rows.lock().unwrap();
            rows.push(availability_row(
                "host@example.com",
                "2026-09-01",
                now - Duration::days(1),
            ));
            rows.push(availability_row(
                "host@example.com",
                "2026-09-05",
                now + Duration::days(3),
            ));
        }

        let sweeper = ExpirationSweeper::new(availabilities.clone(), slots);
        let affected = sweeper.sweep_availabilities_once(now).await;
        assert_eq!(affected, 1);

        let rows = availabilities.rows.lock().unwrap().clone();
        assert_eq!(rows[0].status, AvailabilityStatus::Inactive);
        assert_eq!(rows[1].status, AvailabilityStatus::Active);

        // second pass finds nothing left to do
        assert_eq!(sweeper.sweep_availabilities_once(now).await, 0);
    }

    #[test]
    fn next_occurrence_is_later_today_when_still_ahead() {
        let tz = chrono_tz::Asia::Kolkata;
        // 2026-09-01 10:00 IST
        let now = tz
            .with_ymd_and_hms(2026, 9, 1, 10, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let at = NaiveTime::from_hms_opt(23, 59, 0).unwrap();

        let wait = duration_until_next_occurrence(now, tz, at);
        assert_eq!(wait.as_secs(), (13 * 60 + 59) * 60);
    }

    #[test]
    fn next_occurrence_rolls_to_tomorrow_when_already_past() {
        let tz = chrono_tz::Asia::Kolkata;
        // 23:59:30 IST, just past today's trigger
        let now = tz
            .with_ymd_and_hms(2026, 9, 1, 23, 59, 30)
            .unwrap()
            .with_timezone(&Utc);
        let at = NaiveTime::from_hms_opt(23, 59, 0).unwrap();

        let wait = duration_until_next_occurrence(now, tz, at);
        assert_eq!(wait.as_secs(), 24 * 60 * 60 - 30);
    }
}
