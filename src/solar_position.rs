//! Low-precision solar coordinates (NOAA / Meeus series)
//!
//! Every function takes `t`, Julian centuries since J2000.0 (see
//! [`crate::julian::julian_day_to_century`]), and returns degrees unless noted.
//! Accuracy is about 0.01° in declination for dates within a few centuries of
//! 2000, which is far below the one-minute resolution the matcher works at.

use crate::angle::{deg_to_rad, rad_to_deg};

/// Longitude of the Moon's ascending node, the argument of the nutation terms.
fn ascending_node(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

/// Mean obliquity of the ecliptic (Laskar cubic, arc-seconds folded into degrees).
pub fn mean_obliquity_of_ecliptic(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// Mean obliquity plus the leading nutation-in-obliquity term.
pub fn obliquity_correction(t: f64) -> f64 {
    mean_obliquity_of_ecliptic(t) + 0.00256 * deg_to_rad(ascending_node(t)).cos()
}

/// Geometric mean longitude of the sun, always in `[0, 360)`.
pub fn geom_mean_long_sun(t: f64) -> f64 {
    normalize_degrees(280.46646 + t * (36000.76983 + 0.0003032 * t))
}

/// Eccentricity of Earth's orbit (unitless).
pub fn eccentricity_earth_orbit(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

/// Geometric mean anomaly of the sun. Not normalized; only ever fed to trig.
pub fn geom_mean_anomaly_sun(t: f64) -> f64 {
    357.52911 + t * (35999.05029 - 0.0001537 * t)
}

/// Equation of center: true anomaly minus mean anomaly.
pub fn sun_eq_of_center(t: f64) -> f64 {
    let m = deg_to_rad(geom_mean_anomaly_sun(t));
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

pub fn sun_true_long(t: f64) -> f64 {
    geom_mean_long_sun(t) + sun_eq_of_center(t)
}

/// True longitude corrected for nutation and aberration.
pub fn sun_apparent_long(t: f64) -> f64 {
    sun_true_long(t) - 0.00569 - 0.00478 * deg_to_rad(ascending_node(t)).sin()
}

/// Solar declination, north-positive.
pub fn sun_declination(t: f64) -> f64 {
    let sint = deg_to_rad(obliquity_correction(t)).sin() * deg_to_rad(sun_apparent_long(t)).sin();
    rad_to_deg(sint.asin())
}

/// Fold an angle into `[0, 360)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `360.0`; that case
/// is mapped back to `0.0`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let folded = angle.rem_euclid(360.0);
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}
