//! # Hour Angle and Event-Time Solver
//!
//! Finds the UTC time of day at which the centre of the solar disk sits 90.833°
//! from the zenith: the geometric horizon plus 0.833° for standard refraction and
//! the sun's apparent half-diameter.
//!
//! ## Hour angle
//! ```text
//! cos H = cos(90.833°) / (cos φ · cos δ) − tan φ · tan δ
//! ```
//! When the right-hand side leaves `[-1, 1]` the sun never reaches that altitude:
//! below `-1` it stays up all day, above `1` it stays down. This is checked before
//! `acos` is called, so no NaN ever leaves this module.
//!
//! ## Two-pass refinement
//! Declination and the equation of time drift during the day, so the event is
//! solved once at 0h of the date and then again at the first estimate:
//!
//! 1. `eqTime`, `δ`, `H` at `t`
//! 2. `timeUTC₀ = 720 + 4·(λw − H) − eqTime` minutes
//! 3. `t' = t + timeUTC₀ / 1440` days, expressed in centuries
//! 4. `eqTime`, `δ`, `H` at `t'`
//! 5. `timeUTC = 720 + 4·(λw − H) − eqTime`
//!
//! `λw` is the west-positive longitude. Two passes is a fixed budget; there is no
//! convergence loop.

use crate::angle::{deg_to_rad, rad_to_deg};
use crate::equation_of_time::equation_of_time;
use crate::julian::{century_to_julian_day, julian_day_to_century};
use crate::solar_position::sun_declination;
use crate::{GeoCoordinate, PolarCondition, SolarError, SolarEventKind};
use tracing::debug;

/// Zenith distance of the sun's centre at apparent sunrise/sunset, in degrees.
pub const SUN_HORIZON_ZENITH_DEG: f64 = 90.833;

/// Minutes in a day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Number of solver passes.
const PASSES: usize = 2;

/// The raw `cos H` value for a latitude and declination, both in degrees.
pub fn hour_angle_argument(latitude: f64, declination: f64) -> f64 {
    let lat = deg_to_rad(latitude);
    let dec = deg_to_rad(declination);
    deg_to_rad(SUN_HORIZON_ZENITH_DEG).cos() / (lat.cos() * dec.cos()) - lat.tan() * dec.tan()
}

/// Signed horizon hour angle in **radians**.
///
/// Positive for sunrise, negative for sunset; the two are exact mirror images.
pub fn hour_angle(
    latitude: f64,
    declination: f64,
    kind: SolarEventKind,
) -> Result<f64, SolarError> {
    for (field, value) in [("latitude", latitude), ("declination", declination)] {
        if !value.is_finite() {
            return Err(SolarError::InvalidCoordinate { field, value });
        }
    }
    let arg = hour_angle_argument(latitude, declination);
    if arg < -1.0 {
        return Err(SolarError::NoSolarEvent(PolarCondition::MidnightSun));
    }
    if arg > 1.0 {
        return Err(SolarError::NoSolarEvent(PolarCondition::PolarNight));
    }
    Ok(kind.hour_angle_sign() * arg.acos())
}

/// Sunrise hour angle in radians, always positive.
pub fn hour_angle_sunrise(latitude: f64, declination: f64) -> Result<f64, SolarError> {
    hour_angle(latitude, declination, SolarEventKind::Sunrise)
}

/// Sunset hour angle in radians, the negation of [`hour_angle_sunrise`].
pub fn hour_angle_sunset(latitude: f64, declination: f64) -> Result<f64, SolarError> {
    hour_angle(latitude, declination, SolarEventKind::Sunset)
}

/// UTC time of the event, in minutes after 0h UTC of the date `jd` is anchored at.
///
/// The result can fall outside `[0, 1440)` when the event happens on the
/// neighbouring UTC day, e.g. sunrise in eastern Australia is negative.
///
/// # Example
/// ```
/// use sun_trigger_lib::event::event_time_utc;
/// use sun_trigger_lib::{GeoCoordinate, SolarEventKind};
///
/// let philadelphia = GeoCoordinate::new(39.95, -75.15).unwrap();
/// let sunrise = event_time_utc(2_453_337.5, philadelphia, SolarEventKind::Sunrise).unwrap();
/// // 12:00:28 UTC, i.e. 07:00 EST
/// assert!((sunrise - 720.48).abs() < 0.01);
/// ```
///
/// # Errors
/// [`SolarError::InvalidCoordinate`] for out-of-range or non-finite coordinates,
/// [`SolarError::NoSolarEvent`] when the sun does not cross the horizon that day.
pub fn event_time_utc(
    jd: f64,
    coord: GeoCoordinate,
    kind: SolarEventKind,
) -> Result<f64, SolarError> {
    let coord = GeoCoordinate::new(coord.latitude, coord.longitude)?;
    let mut t = julian_day_to_century(jd);
    let mut time_utc = 0.0;

    for pass in 0..PASSES {
        if pass > 0 {
            t = julian_day_to_century(century_to_julian_day(t) + time_utc / MINUTES_PER_DAY);
        }
        let eq_time = equation_of_time(t);
        let declination = sun_declination(t);
        let ha = hour_angle(coord.latitude, declination, kind)?;
        time_utc = 720.0 + 4.0 * (coord.longitude_west() - rad_to_deg(ha)) - eq_time;

        debug!(
            %kind,
            pass,
            t,
            eq_time,
            declination,
            time_utc,
            "solar event pass"
        );
    }

    Ok(time_utc)
}

/// Sunrise and sunset UTC minutes for the same date, in that order.
pub fn event_times_utc(jd: f64, coord: GeoCoordinate) -> Result<(f64, f64), SolarError> {
    let sunrise = event_time_utc(jd, coord, SolarEventKind::Sunrise)?;
    let sunset = event_time_utc(jd, coord, SolarEventKind::Sunset)?;
    Ok((sunrise, sunset))
}
