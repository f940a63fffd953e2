//! Geographic coordinates and the tagged outcome of a capture attempt.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A validated WGS84 coordinate pair. Construction rejects out-of-range
/// values instead of clamping them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !Self::in_bounds(latitude, longitude) {
            return Err(AppError::Validation(format!(
                "coordinates out of range: lat={latitude}, lon={longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// NaN fails both range checks, so it is rejected as well.
    pub fn in_bounds(latitude: f64, longitude: f64) -> bool {
        (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
    }
}

/// Accuracy requested from the OS positioning layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccuracyHint {
    Coarse,
    #[default]
    Balanced,
    Precise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationFailureReason {
    Unsupported,
    ServicesDisabled,
    PermissionDenied,
    Timeout,
    ReadFailed,
    OutOfRange,
}

impl LocationFailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationFailureReason::Unsupported => "unsupported",
            LocationFailureReason::ServicesDisabled => "services_disabled",
            LocationFailureReason::PermissionDenied => "permission_denied",
            LocationFailureReason::Timeout => "timeout",
            LocationFailureReason::ReadFailed => "read_failed",
            LocationFailureReason::OutOfRange => "out_of_range",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationFailure {
    pub reason: LocationFailureReason,
    pub permission_denied: bool,
    pub requires_settings_redirect: bool,
}

impl LocationFailure {
    pub fn of(reason: LocationFailureReason) -> Self {
        Self {
            reason,
            permission_denied: matches!(reason, LocationFailureReason::PermissionDenied),
            requires_settings_redirect: false,
        }
    }

    /// Permission refused; `settings_redirect` marks a permanent denial
    /// where re-prompting is a dead end.
    pub fn denied(settings_redirect: bool) -> Self {
        Self {
            reason: LocationFailureReason::PermissionDenied,
            permission_denied: true,
            requires_settings_redirect: settings_redirect,
        }
    }
}

/// Terminal outcome of one capture attempt. Location is evidentiary, so a
/// failure here never aborts the calling workflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LocationResult {
    Success(GeoPoint),
    Failure(LocationFailure),
}

impl LocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LocationResult::Success(_))
    }

    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            LocationResult::Success(p) => Some(*p),
            LocationResult::Failure(_) => None,
        }
    }
}
