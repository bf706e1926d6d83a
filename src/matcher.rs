//! # Local-Minute Matcher
//!
//! The only entry point a scheduler needs: given the local minute it is about to
//! fire for, does that minute hold the sunrise (or sunset) at a location?
//!
//! ## Pipeline
//! 1. Take the calendar date of the supplied timestamp and resolve its local
//!    midnight to UTC through the [`CivilTimeProvider`]; the gap between the two
//!    is the zone's UTC offset at midnight.
//! 2. Solve the UTC event time for that date ([`crate::event::event_time_utc`]).
//! 3. Place the event on the time axis at 0h UTC of the date plus the solved
//!    minutes, truncated to whole seconds.
//! 4. Convert back to local wall-clock fields and compare to the minute.
//!
//! Each call recomputes everything; callers that evaluate many minutes of the
//! same day can memoise [`SolarMatcher::local_event_time`] per
//! `(date, coordinate, kind)` themselves.

use crate::civil::{same_minute, CivilTimeProvider};
use crate::event::event_time_utc;
use crate::julian::civil_date_to_julian_day;
use crate::{GeoCoordinate, MinuteMatch, SolarError, SolarEventKind};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

/// Answers sunrise/sunset predicates for one timezone.
#[derive(Clone, Debug)]
pub struct SolarMatcher<P> {
    provider: P,
}

impl<P: CivilTimeProvider> SolarMatcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Local wall-clock time of the event on `date`, to the second.
    ///
    /// # Errors
    /// - [`SolarError::NoSolarEvent`] for polar day/night
    /// - [`SolarError::CivilConversion`] when the provider cannot convert
    /// - [`SolarError::InvalidCoordinate`] for out-of-range coordinates
    pub fn local_event_time(
        &self,
        date: NaiveDate,
        coord: GeoCoordinate,
        kind: SolarEventKind,
    ) -> Result<NaiveDateTime, SolarError> {
        let coord = GeoCoordinate::new(coord.latitude, coord.longitude)?;

        let midnight_utc = self.provider.civil_midnight_of(date).map_err(|e| {
            warn!(%date, error = %e, "can't determine sun phase");
            e
        })?;
        // UTC offset in force at local midnight
        let delta = date.and_time(NaiveTime::MIN) - midnight_utc.naive_utc();

        let jd = civil_date_to_julian_day(&date);
        let time_utc = event_time_utc(jd, coord, kind)?;
        let event_seconds = (time_utc * 60.0).floor() as i64;

        let event_utc = midnight_utc
            .checked_add_signed(delta)
            .and_then(|utc_midnight| {
                utc_midnight.checked_add_signed(Duration::seconds(event_seconds))
            })
            .ok_or_else(|| {
                SolarError::civil(
                    "placing event on the time axis",
                    format!("{date} is out of range"),
                )
            })?;

        self.provider.utc_to_civil(event_utc).map_err(|e| {
            warn!(%date, error = %e, "can't determine sun phase");
            e
        })
    }

    /// Test `local` against the event on its own calendar date.
    ///
    /// A day without the event is reported as [`MinuteMatch::NoSolarEvent`], not as
    /// [`MinuteMatch::NoMatch`].
    pub fn matches_event(
        &self,
        local: NaiveDateTime,
        coord: GeoCoordinate,
        kind: SolarEventKind,
    ) -> Result<MinuteMatch, SolarError> {
        let outcome = match self.local_event_time(local.date(), coord, kind) {
            Ok(event) if same_minute(&event, &local) => MinuteMatch::Match,
            Ok(_) => MinuteMatch::NoMatch,
            Err(SolarError::NoSolarEvent(condition)) => MinuteMatch::NoSolarEvent(condition),
            Err(e) => return Err(e),
        };
        debug!(%local, %coord, %kind, ?outcome, "solar minute check");
        Ok(outcome)
    }

    /// Whether `local` is the sunrise minute.
    ///
    /// Polar day or night comes back as `Err(SolarError::NoSolarEvent(_))`.
    ///
    /// # Example
    /// ```
    /// use chrono::{NaiveDate, Utc};
    /// use sun_trigger_lib::{civil::ZoneProvider, matcher::SolarMatcher, GeoCoordinate};
    ///
    /// let matcher = SolarMatcher::new(ZoneProvider::new(Utc));
    /// let equator = GeoCoordinate::new(0.0, 0.0).unwrap();
    /// let morning = NaiveDate::from_ymd_opt(2024, 9, 22)
    ///     .unwrap()
    ///     .and_hms_opt(5, 49, 0)
    ///     .unwrap();
    /// assert!(matcher.is_sunrise_at(morning, equator).unwrap());
    /// ```
    pub fn is_sunrise_at(
        &self,
        local: NaiveDateTime,
        coord: GeoCoordinate,
    ) -> Result<bool, SolarError> {
        self.is_event_at(local, coord, SolarEventKind::Sunrise)
    }

    /// Whether `local` is the sunset minute. See [`SolarMatcher::is_sunrise_at`].
    pub fn is_sunset_at(
        &self,
        local: NaiveDateTime,
        coord: GeoCoordinate,
    ) -> Result<bool, SolarError> {
        self.is_event_at(local, coord, SolarEventKind::Sunset)
    }

    fn is_event_at(
        &self,
        local: NaiveDateTime,
        coord: GeoCoordinate,
        kind: SolarEventKind,
    ) -> Result<bool, SolarError> {
        match self.matches_event(local, coord, kind)? {
            MinuteMatch::Match => Ok(true),
            MinuteMatch::NoMatch => Ok(false),
            MinuteMatch::NoSolarEvent(condition) => Err(SolarError::NoSolarEvent(condition)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::ZoneProvider;
    use crate::PolarCondition;
    use chrono::{DateTime, FixedOffset, Timelike, Utc};

    /// Provider whose conversions always fail.
    struct BrokenClock;

    impl CivilTimeProvider for BrokenClock {
        fn civil_midnight_of(&self, date: NaiveDate) -> Result<DateTime<Utc>, SolarError> {
            Err(SolarError::civil("resolving local midnight", date.to_string()))
        }

        fn utc_to_civil(&self, instant: DateTime<Utc>) -> Result<NaiveDateTime, SolarError> {
            Err(SolarError::civil("converting event to local time", instant.to_string()))
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn est() -> SolarMatcher<ZoneProvider<FixedOffset>> {
        SolarMatcher::new(ZoneProvider::new(FixedOffset::west_opt(5 * 3600).unwrap()))
    }

    #[test]
    fn test_local_event_time_philadelphia() {
        let philly = GeoCoordinate::new(39.95, -75.15).unwrap();
        let date = NaiveDate::from_ymd_opt(2004, 11, 28).unwrap();
        let rise = est()
            .local_event_time(date, philly, SolarEventKind::Sunrise)
            .unwrap();
        let set = est()
            .local_event_time(date, philly, SolarEventKind::Sunset)
            .unwrap();
        assert_eq!(rise, date.and_hms_opt(7, 0, 28).unwrap());
        assert_eq!(set, date.and_hms_opt(16, 36, 47).unwrap());
    }

    #[test]
    fn test_seconds_do_not_matter() {
        let philly = GeoCoordinate::new(39.95, -75.15).unwrap();
        let early = at(2004, 11, 28, 7, 0);
        let late = early + Duration::seconds(59);
        assert!(est().is_sunrise_at(early, philly).unwrap());
        assert!(est().is_sunrise_at(late, philly).unwrap());
        assert!(!est()
            .is_sunrise_at(early + Duration::minutes(1), philly)
            .unwrap());
    }

    #[test]
    fn test_polar_night_is_not_false() {
        let matcher = SolarMatcher::new(ZoneProvider::new(Utc));
        let arctic = GeoCoordinate::new(85.0, 10.0).unwrap();
        let noon = at(2024, 12, 21, 12, 0);
        assert_eq!(
            matcher.matches_event(noon, arctic, SolarEventKind::Sunrise),
            Ok(MinuteMatch::NoSolarEvent(PolarCondition::PolarNight))
        );
        assert_eq!(
            matcher.is_sunset_at(noon, arctic),
            Err(SolarError::NoSolarEvent(PolarCondition::PolarNight))
        );
    }

    #[test]
    fn test_provider_failure_surfaces() {
        let matcher = SolarMatcher::new(BrokenClock);
        let philly = GeoCoordinate::new(39.95, -75.15).unwrap();
        let err = matcher
            .is_sunrise_at(at(2004, 11, 28, 7, 0), philly)
            .unwrap_err();
        assert!(matches!(err, SolarError::CivilConversion { .. }));
    }

    #[test]
    fn test_unvalidated_coordinate_is_rejected() {
        let bogus = GeoCoordinate {
            latitude: 120.0,
            longitude: 0.0,
        };
        let err = est().is_sunrise_at(at(2024, 1, 1, 7, 0), bogus).unwrap_err();
        assert_eq!(
            err,
            SolarError::InvalidCoordinate {
                field: "latitude",
                value: 120.0
            }
        );
    }

    #[test]
    fn test_east_of_greenwich_uses_the_right_day() {
        // UTC+10: local midnight is 14:00 UTC the previous day
        let aest = SolarMatcher::new(ZoneProvider::new(FixedOffset::east_opt(10 * 3600).unwrap()));
        let sydney = GeoCoordinate::new(-33.87, 151.21).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let set = aest
            .local_event_time(date, sydney, SolarEventKind::Sunset)
            .unwrap();
        assert_eq!(set.date(), date);
        assert_eq!((set.hour(), set.minute()), (16, 53));
    }
}
