//! # Error Types
//!
//! Every failure the predicate can hit is a variant here. None of them are worth
//! retrying: the computation is deterministic, so the same inputs fail the same
//! way again.

use crate::PolarCondition;
use thiserror::Error;

/// Errors from solving or matching a solar event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolarError {
    /// Latitude or longitude outside its valid range, or not a finite number
    #[error("invalid {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },

    /// The sun does not cross the horizon on this date at this latitude.
    ///
    /// An expected answer for high latitudes, not a malfunction.
    #[error("no solar event: {0}")]
    NoSolarEvent(PolarCondition),

    /// The civil-time provider could not convert between local time and UTC
    #[error("civil time conversion failed while {stage}: {detail}")]
    CivilConversion { stage: &'static str, detail: String },
}

impl SolarError {
    pub(crate) fn civil(stage: &'static str, detail: impl Into<String>) -> Self {
        SolarError::CivilConversion {
            stage,
            detail: detail.into(),
        }
    }
}
