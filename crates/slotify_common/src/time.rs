// --- File: crates/slotify_common/src/time.rs ---
//! Storage timestamp formatting.
//!
//! Timestamps are persisted as fixed-width RFC3339 UTC strings
//! (`2026-08-07T09:00:00Z`). With one format and one offset, string
//! comparison agrees with instant comparison, which the sweep range
//! predicates rely on.

use chrono::{DateTime, SecondsFormat, Utc};

/// Formats an instant for storage.
pub fn to_storage(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses a stored timestamp back into an instant.
pub fn from_storage(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn storage_format_is_fixed_width_utc() {
        let dt = Utc.with_ymd_and_hms(2026, 8, 7, 9, 0, 0).unwrap();
        assert_eq!(to_storage(dt), "2026-08-07T09:00:00Z");
    }

    #[test]
    fn storage_strings_order_like_instants() {
        let earlier = Utc.with_ymd_and_hms(2026, 8, 7, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 8, 7, 9, 30, 0).unwrap();
        assert!(to_storage(earlier) < to_storage(later));
    }

    #[test]
    fn round_trips() {
        let dt = Utc.with_ymd_and_hms(2026, 8, 7, 23, 59, 59).unwrap();
        assert_eq!(from_storage(&to_storage(dt)).unwrap(), dt);
    }
}
