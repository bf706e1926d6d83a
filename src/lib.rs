//! # Sun Trigger Core Library
//!
//! This library answers one question for a time-triggered scheduler: *is this local
//! minute the minute of sunrise (or sunset) at this place?* It lets a schedule say
//! "run at local sunrise" instead of naming a fixed wall-clock time.
//!
//! ## Layers
//!
//! The crate is layered bottom-up, each layer only calling the ones below it:
//!
//! 1. [`angle`]: degree/radian helpers
//! 2. [`julian`]: civil date → Julian Day → Julian centuries since J2000.0
//! 3. [`solar_position`]: orbital series for the sun's longitude, anomaly,
//!    obliquity and declination
//! 4. [`equation_of_time`]: mean vs. apparent solar time, in minutes
//! 5. [`event`]: horizon hour angle and the two-pass UTC event-time solver
//! 6. [`matcher`]: reconciles the UTC event with a local civil minute through an
//!    injected [`civil::CivilTimeProvider`]
//!
//! Everything except the civil-time provider is pure and allocation-free. Nothing is
//! cached between calls; a predicate evaluation is a fixed handful of trig calls.
//!
//! ## Conventions
//! - Longitudes are **east-positive** at the API boundary (Philadelphia is `-75.15`).
//! - Angles are degrees everywhere except inside the hour-angle functions, which
//!   return radians.
//! - Civil timestamps are [`chrono::NaiveDateTime`]; the zone they belong to is the
//!   one the provider was built for.
//!
//! ## Example
//! ```
//! use chrono::{FixedOffset, NaiveDate};
//! use sun_trigger_lib::{civil::ZoneProvider, matcher::SolarMatcher, GeoCoordinate};
//!
//! let est = FixedOffset::west_opt(5 * 3600).unwrap();
//! let matcher = SolarMatcher::new(ZoneProvider::new(est));
//! let philadelphia = GeoCoordinate::new(39.95, -75.15).unwrap();
//!
//! let now = NaiveDate::from_ymd_opt(2004, 11, 28)
//!     .unwrap()
//!     .and_hms_opt(7, 0, 12)
//!     .unwrap();
//! assert!(matcher.is_sunrise_at(now, philadelphia).unwrap());
//! assert!(!matcher.is_sunset_at(now, philadelphia).unwrap());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod angle;
pub mod civil;
pub mod config;
pub mod equation_of_time;
pub mod error;
pub mod event;
pub mod julian;
pub mod matcher;
pub mod solar_position;

#[cfg(test)]
mod tests;

pub use error::SolarError;

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude is north-positive, longitude east-positive. Construct through
/// [`GeoCoordinate::new`] to get range checking; the solver itself trusts whatever
/// it is handed.
///
/// # Example
/// ```
/// use sun_trigger_lib::GeoCoordinate;
///
/// let london = GeoCoordinate::new(51.5, -0.13).unwrap();
/// assert_eq!(london.latitude, 51.5);
///
/// assert!(GeoCoordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Degrees north of the equator, `[-90, 90]`
    pub latitude: f64,
    /// Degrees east of Greenwich, `[-180, 180]`
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Validate and build a coordinate.
    ///
    /// Rejects non-finite values and anything outside the latitude/longitude
    /// ranges with [`SolarError::InvalidCoordinate`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SolarError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SolarError::InvalidCoordinate {
                field: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(SolarError::InvalidCoordinate {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Longitude in the west-positive convention the NOAA series is written in.
    pub(crate) fn longitude_west(&self) -> f64 {
        -self.longitude
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// Which horizon crossing to solve for.
///
/// The two events share one formula and differ only in the sign of the hour
/// angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarEventKind {
    Sunrise,
    Sunset,
}

impl SolarEventKind {
    /// Both events in the order they happen during a day.
    pub const ALL: [SolarEventKind; 2] = [SolarEventKind::Sunrise, SolarEventKind::Sunset];

    /// Sign applied to the horizon hour angle: sunrise is east of the meridian.
    pub(crate) fn hour_angle_sign(self) -> f64 {
        match self {
            SolarEventKind::Sunrise => 1.0,
            SolarEventKind::Sunset => -1.0,
        }
    }
}

impl fmt::Display for SolarEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolarEventKind::Sunrise => f.pad("sunrise"),
            SolarEventKind::Sunset => f.pad("sunset"),
        }
    }
}

/// Why a day has no sunrise or sunset at a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolarCondition {
    /// The sun stays above the horizon all day.
    MidnightSun,
    /// The sun stays below the horizon all day.
    PolarNight,
}

impl fmt::Display for PolarCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolarCondition::MidnightSun => f.pad("midnight sun"),
            PolarCondition::PolarNight => f.pad("polar night"),
        }
    }
}

/// Outcome of testing a local minute against a solar event.
///
/// Keeps "the event happens at some other minute" apart from "the event does not
/// happen at all today".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinuteMatch {
    /// The supplied minute is the event minute.
    Match,
    /// The event happens, but at a different minute.
    NoMatch,
    /// The event does not happen on this date at this location.
    NoSolarEvent(PolarCondition),
}

impl MinuteMatch {
    pub fn is_match(self) -> bool {
        matches!(self, MinuteMatch::Match)
    }
}
