//! Local validation of session submissions.
//!
//! Runs before any network call; a failing request is never sent.

use std::fmt;

use crate::api::SessionRequest;

/// Allowed sleep range, in hours.
pub const SLEEP_HOURS_RANGE: std::ops::RangeInclusive<f64> = 0.0..=12.0;

/// Range shared by stress, soreness and RPE scales.
pub const SCALE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// A session field that is missing or out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormValidation {
    MissingPlayerName,
    SleepHours,
    StressLevel,
    DistanceKm,
    SprintCount,
    Soreness,
    Rpe,
}

impl fmt::Display for FormValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValidation::MissingPlayerName => write!(f, "Player name is required"),
            FormValidation::SleepHours => write!(f, "Sleep hours must be between 0 and 12"),
            FormValidation::StressLevel => write!(f, "Stress level must be between 1 and 10"),
            FormValidation::DistanceKm => write!(f, "Distance must be a number of km, 0 or more"),
            FormValidation::SprintCount => write!(f, "Sprint count must be a whole number, 0 or more"),
            FormValidation::Soreness => write!(f, "Soreness must be between 1 and 10"),
            FormValidation::Rpe => write!(f, "RPE must be between 1 and 10"),
        }
    }
}

impl std::error::Error for FormValidation {}

/// Checks required fields and ranges.
///
/// # Errors
/// Returns the first offending field, in form order.
pub fn validate(request: &SessionRequest) -> Result<(), FormValidation> {
    if request.player_name.trim().is_empty() {
        return Err(FormValidation::MissingPlayerName);
    }
    if !SLEEP_HOURS_RANGE.contains(&request.sleep_hours) {
        return Err(FormValidation::SleepHours);
    }
    if !SCALE_RANGE.contains(&request.stress_level) {
        return Err(FormValidation::StressLevel);
    }
    if !(request.distance_km.is_finite() && request.distance_km >= 0.0) {
        return Err(FormValidation::DistanceKm);
    }
    if request.soreness.is_some_and(|v| !SCALE_RANGE.contains(&v)) {
        return Err(FormValidation::Soreness);
    }
    if request.rpe.is_some_and(|v| !SCALE_RANGE.contains(&v)) {
        return Err(FormValidation::Rpe);
    }
    Ok(())
}
