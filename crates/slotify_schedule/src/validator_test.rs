#[cfg(test)]
mod tests {
    use crate::error::ScheduleError;
    use crate::test_support::{availability_row, fixture};
    use crate::validator::{validate_availability_request, CreateAvailabilityRequest};
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    const TZ: Tz = chrono_tz::Asia::Kolkata;

    fn request(
        date: &str,
        day_start_time: &str,
        day_end_time: &str,
        per_slot_duration: i64,
    ) -> CreateAvailabilityRequest {
        CreateAvailabilityRequest {
            title: "Office hours".to_string(),
            date: date.to_string(),
            day_start_time: day_start_time.to_string(),
            day_end_time: day_end_time.to_string(),
            per_slot_duration,
            metadata: None,
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn valid_request_resolves_wall_clock_in_configured_zone() {
        let f = fixture();
        let validated = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-09-01", "09:00", "17:00", 30),
            now(),
        )
        .await
        .unwrap();

        // 09:00 IST is 03:30 UTC
        assert_eq!(
            validated.day_start_time,
            Utc.with_ymd_and_hms(2026, 9, 1, 3, 30, 0).unwrap()
        );
        assert_eq!(
            validated.day_end_time,
            Utc.with_ymd_and_hms(2026, 9, 1, 11, 30, 0).unwrap()
        );
        assert_eq!(validated.per_slot_duration, 30);
    }

    #[tokio::test]
    async fn start_at_or_after_end_is_rejected() {
        let f = fixture();
        for (start, end) in [("17:00", "09:00"), ("09:00", "09:00")] {
            let err = validate_availability_request(
                &f.availabilities,
                TZ,
                "host@example.com",
                &request("2026-09-01", start, end, 30),
                now(),
            )
            .await
            .unwrap_err();
            assert!(matches!(err, ScheduleError::InvalidRange));
        }
    }

    #[tokio::test]
    async fn duration_off_the_15_minute_grid_is_rejected() {
        let f = fixture();
        let err = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-09-01", "09:00", "17:00", 20),
            now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidGranularity));
    }

    #[tokio::test]
    async fn fifty_minute_window_with_20_minute_slots_is_rejected() {
        let f = fixture();
        let err = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-09-01", "09:00", "09:50", 20),
            now(),
        )
        .await
        .unwrap_err();
        // 20 is already off the grid; the request never reaches the
        // divisibility check
        assert!(matches!(err, ScheduleError::InvalidGranularity));
    }

    #[tokio::test]
    async fn duration_beyond_bounds_is_rejected() {
        let f = fixture();
        let err = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-09-01", "09:00", "17:00", 75),
            now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScheduleError::DurationOutOfRange));
    }

    #[tokio::test]
    async fn duration_longer_than_window_is_rejected() {
        let f = fixture();
        let err = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-09-01", "09:00", "09:30", 45),
            now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDuration));
    }

    #[tokio::test]
    async fn window_not_divisible_by_duration_is_rejected() {
        let f = fixture();
        // 60-minute window, 45-minute slots: a 15-minute remainder
        let err = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-09-01", "09:00", "10:00", 45),
            now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::IndivisibleWindow {
                total_minutes: 60,
                per_slot_duration: 45
            }
        ));
    }

    #[tokio::test]
    async fn window_starting_in_the_past_is_rejected() {
        let f = fixture();
        let err = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-07-01", "09:00", "17:00", 30),
            now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScheduleError::PastDate));
    }

    #[tokio::test]
    async fn same_day_window_later_today_is_accepted() {
        let f = fixture();
        // now() is 2026-08-01 12:00 UTC = 17:30 IST; an 18:00 IST start is
        // still ahead
        let validated = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-08-01", "18:00", "20:00", 30),
            now(),
        )
        .await
        .unwrap();
        assert!(validated.day_start_time > now());
    }

    #[tokio::test]
    async fn second_availability_for_same_host_and_date_is_rejected() {
        let f = fixture();
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 3, 30, 0).unwrap();
        f.availabilities
            .rows
            .lock()
            .unwrap()
            .push(availability_row("host@example.com", "2026-09-01", start));

        let err = validate_availability_request(
            &f.availabilities,
            TZ,
            "host@example.com",
            &request("2026-09-01", "09:00", "17:00", 30),
            now(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateAvailability));

        // A different host on the same date is fine
        validate_availability_request(
            &f.availabilities,
            TZ,
            "other@example.com",
            &request("2026-09-01", "09:00", "17:00", 30),
            now(),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn malformed_date_and_times_are_parse_errors() {
        let f = fixture();
        for req in [
            request("next tuesday", "09:00", "17:00", 30),
            request("2026-09-01", "9am", "17:00", 30),
            request("2026-09-01", "09:00", "late", 30),
        ] {
            let err = validate_availability_request(
                &f.availabilities,
                TZ,
                "host@example.com",
                &req,
                now(),
            )
            .await
            .unwrap_err();
            assert!(matches!(err, ScheduleError::TimeParse { .. }));
        }
    }
}
