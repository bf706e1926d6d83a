//! # Civil Time Provider
//!
//! The solver works in UTC; schedules are written in local wall-clock time. The
//! conversion between the two (UTC offsets, daylight saving, the timezone
//! database) is not this crate's business, so it goes through the
//! [`CivilTimeProvider`] trait and the host decides which zone applies.
//!
//! [`ZoneProvider`] adapts any [`chrono::TimeZone`]: `chrono::Local` for the
//! machine's zone, `chrono_tz::Tz` for a named IANA zone, or `FixedOffset` for a
//! deterministic test clock.

use crate::SolarError;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike, Utc,
};

/// Converts between local civil time and UTC for one timezone.
pub trait CivilTimeProvider {
    /// The UTC instant at which local 00:00 of `date` occurs.
    fn civil_midnight_of(&self, date: NaiveDate) -> Result<DateTime<Utc>, SolarError>;

    /// Local wall-clock fields for a UTC instant.
    fn utc_to_civil(&self, instant: DateTime<Utc>) -> Result<NaiveDateTime, SolarError>;
}

/// [`CivilTimeProvider`] backed by a chrono timezone.
///
/// # Example
/// ```
/// use chrono::{FixedOffset, NaiveDate};
/// use sun_trigger_lib::civil::{CivilTimeProvider, ZoneProvider};
///
/// let provider = ZoneProvider::new(FixedOffset::east_opt(3600).unwrap());
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let midnight = provider.civil_midnight_of(date).unwrap();
/// assert_eq!(midnight.to_rfc3339(), "2024-06-20T23:00:00+00:00");
/// ```
#[derive(Clone, Debug)]
pub struct ZoneProvider<Tz: TimeZone> {
    zone: Tz,
}

impl<Tz: TimeZone> ZoneProvider<Tz> {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }
}

impl ZoneProvider<chrono::Local> {
    /// Provider for the system's local timezone.
    pub fn local() -> Self {
        Self::new(chrono::Local)
    }
}

impl<Tz: TimeZone> CivilTimeProvider for ZoneProvider<Tz> {
    fn civil_midnight_of(&self, date: NaiveDate) -> Result<DateTime<Utc>, SolarError> {
        let midnight = date.and_time(NaiveTime::MIN);
        match self.zone.from_local_datetime(&midnight) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            // Clocks fell back across midnight: take the first occurrence
            LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
            LocalResult::None => Err(SolarError::civil(
                "resolving local midnight",
                format!("{midnight} does not exist in this timezone"),
            )),
        }
    }

    fn utc_to_civil(&self, instant: DateTime<Utc>) -> Result<NaiveDateTime, SolarError> {
        let utc = instant.naive_utc();
        let offset = self.zone.offset_from_utc_datetime(&utc).fix();
        utc.checked_add_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
            .ok_or_else(|| {
                SolarError::civil(
                    "converting event to local time",
                    format!("{instant} is out of range"),
                )
            })
    }
}

/// True when both timestamps fall in the same calendar minute. Seconds are ignored.
pub fn same_minute(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.year() == b.year()
        && a.month() == b.month()
        && a.day() == b.day()
        && a.hour() == b.hour()
        && a.minute() == b.minute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_same_minute_ignores_seconds() {
        assert!(same_minute(&at(2024, 1, 1, 7, 5, 0), &at(2024, 1, 1, 7, 5, 59)));
        assert!(!same_minute(&at(2024, 1, 1, 7, 5, 59), &at(2024, 1, 1, 7, 6, 0)));
        assert!(!same_minute(&at(2024, 1, 1, 7, 5, 0), &at(2024, 1, 2, 7, 5, 0)));
        assert!(!same_minute(&at(2024, 1, 1, 7, 5, 0), &at(2025, 1, 1, 7, 5, 0)));
    }

    #[test]
    fn test_fixed_offset_round_trip() {
        let provider = ZoneProvider::new(FixedOffset::west_opt(5 * 3600).unwrap());
        let date = NaiveDate::from_ymd_opt(2004, 11, 28).unwrap();
        let midnight = provider.civil_midnight_of(date).unwrap();
        assert_eq!(midnight.naive_utc(), at(2004, 11, 28, 5, 0, 0));
        assert_eq!(provider.utc_to_civil(midnight).unwrap(), at(2004, 11, 28, 0, 0, 0));
    }

    #[test]
    fn test_named_zone_follows_daylight_saving() {
        let provider = ZoneProvider::new(chrono_tz::America::New_York);
        let winter = Utc.from_utc_datetime(&at(2024, 1, 15, 12, 0, 0));
        let summer = Utc.from_utc_datetime(&at(2024, 7, 15, 12, 0, 0));
        assert_eq!(provider.utc_to_civil(winter).unwrap(), at(2024, 1, 15, 7, 0, 0));
        assert_eq!(provider.utc_to_civil(summer).unwrap(), at(2024, 7, 15, 8, 0, 0));
    }

    #[test]
    fn test_missing_local_midnight_is_an_error() {
        // Chile springs forward at 24:00 on the first Saturday of September
        let provider = ZoneProvider::new(chrono_tz::America::Santiago);
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let err = provider.civil_midnight_of(date).unwrap_err();
        assert!(matches!(err, SolarError::CivilConversion { .. }));
    }

    #[test]
    fn test_repeated_local_midnight_takes_first() {
        // Cuba falls back from 01:00 to 00:00 on the first Sunday of November
        let provider = ZoneProvider::new(chrono_tz::America::Havana);
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let midnight = provider.civil_midnight_of(date).unwrap();
        // First 00:00 is still on daylight time (UTC-4)
        assert_eq!(midnight.naive_utc(), at(2024, 11, 3, 4, 0, 0));
    }
}
