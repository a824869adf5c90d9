//! Time utilities: local calendar days and ISO date handling.

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse an IANA timezone name like "America/Chicago".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// The local calendar day in `tz` at instant `now`.
///
/// Everything downstream of this reasons in whole calendar days, so this is
/// the only place a timezone is ever applied.
pub fn today_in(tz: &str, now: DateTime<Utc>) -> Result<NaiveDate> {
    let tz = parse_timezone(tz)?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// Parse a canonical "YYYY-MM-DD" calendar date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid calendar date '{s}': {e}"))
}

/// Weekday index with Sunday = 0 through Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_today_in_chicago_lags_utc() {
        // 05:59 UTC on Feb 21 is still Feb 20 in CST (UTC-6)
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 5, 59, 0).unwrap();
        let today = today_in("America/Chicago", now).unwrap();
        assert_eq!(today, NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 12, 0, 0).unwrap();
        assert!(today_in("Mars/Olympus", now).is_err());
    }

    #[test]
    fn test_parse_iso_date() {
        let d = parse_iso_date("2026-02-13").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 13).unwrap());
        assert!(parse_iso_date("13/02/2026").is_err());
    }

    #[test]
    fn test_weekday_index_starts_on_sunday() {
        // 2026-10-18 is a Sunday
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()), 0);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()), 1);
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 10, 24).unwrap()), 6);
    }
}
