//! Wall-clock time for the clock panel.
//!
//! Pure computation with no failure path: the timezone string is parsed
//! into a [`chrono_tz::Tz`] during configuration validation, so by the time
//! these functions run an invalid zone cannot occur.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Current wall-clock time in `tz`, formatted as 12-hour `HH:MM AM/PM`.
pub fn current_time(tz: Tz) -> String {
    format_time(Utc::now(), tz)
}

/// Format an instant as 12-hour `HH:MM AM/PM` wall-clock time in `tz`.
pub fn format_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use chrono_tz::UTC;

    #[test]
    fn test_afternoon_is_twelve_hour_pm() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 20, 5, 0).single().unwrap();
        // 20:05 UTC is 15:05 in New York during standard time
        assert_eq!(format_time(instant, New_York), "03:05 PM");
    }

    #[test]
    fn test_morning_is_zero_padded_am() {
        let instant = Utc.with_ymd_and_hms(2026, 6, 15, 13, 9, 0).single().unwrap();
        // 13:09 UTC is 09:09 in New York during daylight saving time
        assert_eq!(format_time(instant, New_York), "09:09 AM");
    }

    #[test]
    fn test_midnight_is_twelve_am() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).single().unwrap();
        assert_eq!(format_time(instant, UTC), "12:00 AM");
    }

    #[test]
    fn test_noon_is_twelve_pm() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).single().unwrap();
        assert_eq!(format_time(instant, UTC), "12:30 PM");
    }

    #[test]
    fn test_current_time_has_expected_shape() {
        let now = current_time(UTC);
        assert_eq!(now.len(), 8);
        assert!(now.ends_with("AM") || now.ends_with("PM"));
    }
}
