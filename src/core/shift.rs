//! Shift lifecycle controller.
//! Guards the Booked→Started→Completed transitions and submits the matching
//! idempotent mutations through the retry engine. Location capture is
//! evidentiary only; its failure never aborts a clock-in or clock-out.

use crate::boundary::{LocationServices, RemoteData};
use crate::core::classify::is_transient_failure;
use crate::core::location::LocationCapture;
use crate::core::retry::{RetryEngine, RetryOptions};
use crate::errors::{AppError, AppResult};
use crate::models::geo::{AccuracyHint, GeoPoint, LocationResult};
use crate::models::shift::{ShiftMutation, ShiftRecord, ShiftStatus};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct ShiftLifecycleController {
    remote: Arc<dyn RemoteData>,
    location: LocationCapture,
    retry: RetryEngine,
    location_timeout: Duration,
    worker_id: String,
}

impl ShiftLifecycleController {
    pub fn new(
        remote: Arc<dyn RemoteData>,
        services: Arc<dyn LocationServices>,
        retry: RetryOptions,
        location_timeout: Duration,
        worker_id: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            location: LocationCapture::new(services),
            retry: RetryEngine::new(retry),
            location_timeout,
            worker_id: worker_id.into(),
        }
    }

    /// Booked → Started. Sets `actual_start` and, when capture succeeds,
    /// `location_at_start`.
    pub async fn clock_in(&self, schedule_id: &str) -> AppResult<ShiftRecord> {
        self.require_identity()?;
        let current = self.remote.fetch_shift(schedule_id).await?;
        Self::ensure_legal(&current, ShiftStatus::Started)?;
        let location = self.capture_best_effort().await;
        let mutation = ShiftMutation::start(schedule_id, &self.worker_id, Utc::now(), location);
        self.submit(&mutation).await
    }

    /// Started → Completed. Sets `actual_end`, `location_at_end` and the
    /// closing notes. Whether notes may be empty is a caller-level contract.
    pub async fn clock_out(
        &self,
        schedule_id: &str,
        notes: Option<String>,
    ) -> AppResult<ShiftRecord> {
        self.require_identity()?;
        let current = self.remote.fetch_shift(schedule_id).await?;
        Self::ensure_legal(&current, ShiftStatus::Completed)?;
        let location = self.capture_best_effort().await;
        let mutation =
            ShiftMutation::complete(schedule_id, &self.worker_id, Utc::now(), location, notes);
        self.submit(&mutation).await
    }

    /// Transition guard: checked before any capture or remote write so an
    /// illegal call performs no mutation at all.
    fn ensure_legal(current: &ShiftRecord, target: ShiftStatus) -> AppResult<()> {
        if !current.status.can_transition_to(target) {
            return Err(AppError::InvalidTransition(format!(
                "{} -> {}",
                current.status.st_as_str(),
                target.st_as_str()
            )));
        }
        Ok(())
    }

    /// Never submit a mutation without a local identity context; the remote
    /// enforces ownership, but an anonymous attempt is a guaranteed reject.
    fn require_identity(&self) -> AppResult<()> {
        if self.worker_id.trim().is_empty() {
            return Err(AppError::Unauthenticated);
        }
        Ok(())
    }

    async fn capture_best_effort(&self) -> Option<GeoPoint> {
        match self
            .location
            .capture(self.location_timeout, AccuracyHint::Balanced)
            .await
        {
            LocationResult::Success(point) => Some(point),
            LocationResult::Failure(failure) => {
                debug!(
                    reason = failure.reason.as_str(),
                    requires_settings_redirect = failure.requires_settings_redirect,
                    "proceeding without location evidence"
                );
                None
            }
        }
    }

    async fn submit(&self, mutation: &ShiftMutation) -> AppResult<ShiftRecord> {
        self.retry
            .execute(
                || self.remote.submit_shift_mutation(mutation),
                is_transient_failure,
            )
            .await
    }
}
