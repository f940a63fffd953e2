//! Location capture state machine.
//! Walks a fixed sequence of checks (services → permission → read) and
//! always resolves to a terminal LocationResult within the given timeout.
//! At most one native permission dialog per invocation, never a re-prompt.

use crate::boundary::LocationServices;
use crate::models::geo::{
    AccuracyHint, GeoPoint, LocationFailure, LocationFailureReason, LocationResult,
};
use crate::models::permission::PermissionStatus;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Unchecked,
    ServicesChecked,
    PermissionChecked,
    Capturing,
}

impl CaptureState {
    fn as_str(&self) -> &'static str {
        match self {
            CaptureState::Unchecked => "unchecked",
            CaptureState::ServicesChecked => "services_checked",
            CaptureState::PermissionChecked => "permission_checked",
            CaptureState::Capturing => "capturing",
        }
    }
}

pub struct LocationCapture {
    services: Arc<dyn LocationServices>,
}

impl LocationCapture {
    pub fn new(services: Arc<dyn LocationServices>) -> Self {
        Self { services }
    }

    /// Best-effort one-shot capture. Every branch terminates: unsupported or
    /// disabled services, permission dead ends and slow reads all come back
    /// as tagged failures rather than hangs or panics.
    pub async fn capture(&self, timeout: Duration, accuracy: AccuracyHint) -> LocationResult {
        let mut state = CaptureState::Unchecked;
        debug!(state = state.as_str(), "capture started");

        if !self.services.supported() {
            return LocationResult::Failure(LocationFailure::of(LocationFailureReason::Unsupported));
        }
        match self.services.services_enabled().await {
            Ok(true) => {}
            Ok(false) => {
                return LocationResult::Failure(LocationFailure::of(
                    LocationFailureReason::ServicesDisabled,
                ));
            }
            Err(_) => {
                return LocationResult::Failure(LocationFailure::of(
                    LocationFailureReason::ReadFailed,
                ));
            }
        }
        state = CaptureState::ServicesChecked;
        debug!(state = state.as_str(), "location services available");

        let permission = match self.services.permission_state().await {
            Ok(p) => p,
            Err(_) => {
                return LocationResult::Failure(LocationFailure::of(
                    LocationFailureReason::ReadFailed,
                ));
            }
        };
        state = CaptureState::PermissionChecked;
        debug!(
            state = state.as_str(),
            status = permission.status.ps_as_str(),
            can_ask_again = permission.can_ask_again,
            "permission state read"
        );

        match permission.status {
            PermissionStatus::Granted => {}
            // Permanent denial: prompting again is a no-op on most
            // platforms, so the only way forward is system settings.
            PermissionStatus::Denied if !permission.can_ask_again => {
                return LocationResult::Failure(LocationFailure::denied(true));
            }
            _ => match self.services.request_permission().await {
                Ok(PermissionStatus::Granted) => {}
                Ok(_) | Err(_) => {
                    return LocationResult::Failure(LocationFailure::denied(false));
                }
            },
        }

        state = CaptureState::Capturing;
        debug!(state = state.as_str(), "reading current position");

        // Race the position read against the deadline; whichever settles
        // first wins and the other is dropped.
        let read = tokio::time::timeout(timeout, self.services.current_position(accuracy)).await;
        match read {
            Err(_) => LocationResult::Failure(LocationFailure::of(LocationFailureReason::Timeout)),
            Ok(Err(_)) => {
                LocationResult::Failure(LocationFailure::of(LocationFailureReason::ReadFailed))
            }
            Ok(Ok((latitude, longitude))) => match GeoPoint::new(latitude, longitude) {
                Ok(point) => LocationResult::Success(point),
                Err(_) => {
                    LocationResult::Failure(LocationFailure::of(LocationFailureReason::OutOfRange))
                }
            },
        }
    }
}
