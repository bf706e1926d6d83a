//! # Time-scale conversion
//!
//! Civil dates are mapped onto the Julian Day axis and from there onto Julian
//! centuries since J2000.0, the argument every orbital series in
//! [`crate::solar_position`] takes.
//!
//! Only the calendar date enters the Julian Day Number. The result always ends in
//! `.5`, i.e. it is anchored at 0h of that date; the event solver adds the
//! time of day back as a fraction of a day.

use chrono::Datelike;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_EPOCH: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Day at 0h of a proleptic-Gregorian civil date.
///
/// January and February are counted as months 13 and 14 of the previous year so
/// the leap day falls at the end of the counting year.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use sun_trigger_lib::julian::civil_date_to_julian_day;
///
/// let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// assert_eq!(civil_date_to_julian_day(&date), 2_451_544.5);
/// ```
pub fn civil_date_to_julian_day<D: Datelike>(date: &D) -> f64 {
    let (mut year, mut month) = (date.year() as f64, date.month() as f64);
    let day = date.day() as f64;
    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    // Gregorian leap correction
    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Julian centuries elapsed since J2000.0.
#[inline]
pub fn julian_day_to_century(jd: f64) -> f64 {
    (jd - J2000_EPOCH) / DAYS_PER_CENTURY
}

/// Inverse of [`julian_day_to_century`].
#[inline]
pub fn century_to_julian_day(t: f64) -> f64 {
    t * DAYS_PER_CENTURY + J2000_EPOCH
}
