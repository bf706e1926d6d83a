//! Degree/radian conversion.
//!
//! The solar series are tabulated in degrees, `f64` trig works in radians.

use core::f64::consts::PI;

/// Convert an angle in degrees to radians.
#[inline]
pub fn deg_to_rad(angle_deg: f64) -> f64 {
    PI * angle_deg / 180.0
}

/// Convert an angle in radians to degrees.
#[inline]
pub fn rad_to_deg(angle_rad: f64) -> f64 {
    180.0 * angle_rad / PI
}
