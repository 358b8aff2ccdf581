#[cfg(test)]
mod tests {
    use crate::partitioner::partition_into_slots;
    use chrono::{Duration, TimeZone, Utc};
    use slotify_common::models::SlotStatus;

    #[test]
    fn one_hour_window_with_30_minute_slots_yields_two_slots() {
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();

        let slots = partition_into_slots("avl1", start, end, 30, now);

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].slot_start_time, start);
        assert_eq!(slots[0].slot_end_time, start + Duration::minutes(30));
        assert_eq!(slots[1].slot_start_time, start + Duration::minutes(30));
        assert_eq!(slots[1].slot_end_time, end);
        assert!(slots.iter().all(|s| s.status == SlotStatus::Available));
    }

    #[test]
    fn slots_tile_the_window_exactly() {
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 9, 1, 17, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let duration = 30;

        let slots = partition_into_slots("avl1", start, end, duration, now);

        assert_eq!(slots.len() as i64, (end - start).num_minutes() / duration);
        assert_eq!(slots.first().unwrap().slot_start_time, start);
        assert_eq!(slots.last().unwrap().slot_end_time, end);
        for slot in &slots {
            assert_eq!(
                (slot.slot_end_time - slot.slot_start_time).num_minutes(),
                duration
            );
        }
        // contiguous, no gaps or overlaps
        for pair in slots.windows(2) {
            assert_eq!(pair[0].slot_end_time, pair[1].slot_start_time);
        }
    }

    #[test]
    fn slot_ids_are_unique_and_prefixed() {
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 9, 1, 13, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();

        let slots = partition_into_slots("avl1", start, end, 15, now);

        let mut ids: Vec<&str> = slots.iter().map(|s| s.slot_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), slots.len());
        assert!(slots.iter().all(|s| s.slot_id.starts_with("slot")));
        assert!(slots.iter().all(|s| s.availability_id == "avl1"));
    }

    #[test]
    fn fresh_slots_carry_no_booking_data() {
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();

        let slots = partition_into_slots("avl1", start, end, 30, now);

        for slot in &slots {
            assert!(slot.meeting_link.is_none());
            assert!(slot.attendee_email.is_none());
            assert_eq!(slot.created_at, now);
            assert_eq!(slot.updated_at, now);
        }
    }
}
