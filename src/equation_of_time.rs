//! # Equation of Time
//!
//! Difference between apparent (sundial) and mean (clock) solar time. The event
//! solver subtracts it from mean solar noon to find true solar noon.
//!
//! Uses the classical series in `y = tan²(ε/2)`, the orbital eccentricity `e`, the
//! mean longitude `L0` and the mean anomaly `M`:
//!
//! ```text
//! E = y·sin2L0 − 2e·sinM + 4ey·sinM·cos2L0 − ½y²·sin4L0 − 1.25e²·sin2M
//! ```
//!
//! `E` comes out in radians; converted to degrees and multiplied by four (the sun
//! moves one degree of hour angle every four minutes) it becomes minutes of time.

use crate::angle::{deg_to_rad, rad_to_deg};
use crate::solar_position::{
    eccentricity_earth_orbit, geom_mean_anomaly_sun, geom_mean_long_sun, obliquity_correction,
};

/// Equation of time in minutes for `t` Julian centuries since J2000.0.
///
/// Positive when the sundial is ahead of the clock.
pub fn equation_of_time(t: f64) -> f64 {
    let epsilon = obliquity_correction(t);
    let l0 = deg_to_rad(geom_mean_long_sun(t));
    let e = eccentricity_earth_orbit(t);
    let m = deg_to_rad(geom_mean_anomaly_sun(t));

    let y = (deg_to_rad(epsilon) / 2.0).tan().powi(2);

    let sin2l0 = (2.0 * l0).sin();
    let sinm = m.sin();
    let cos2l0 = (2.0 * l0).cos();
    let sin4l0 = (4.0 * l0).sin();
    let sin2m = (2.0 * m).sin();

    let etime = y * sin2l0 - 2.0 * e * sinm + 4.0 * e * y * sinm * cos2l0
        - 0.5 * y * y * sin4l0
        - 1.25 * e * e * sin2m;

    rad_to_deg(etime) * 4.0
}
