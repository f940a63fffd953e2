//! fieldclock library root.
//! Client-side resilience core for shift-based field work: bounded retry
//! with backoff, location capture, the shift clock-in/out lifecycle and
//! document fetch-and-verify. UI, navigation and the backend itself are
//! external collaborators reached through the `boundary` traits.

pub mod boundary;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod utils;

use boundary::{LocationServices, ObjectStore, RemoteData};
use config::Config;
use core::{DocumentFetchVerifier, ShiftLifecycleController};
use std::sync::Arc;
use std::time::Duration;

/// Explicitly assembled context for one authenticated session.
/// Carries the boundary handles into each component so nothing depends on
/// ambient singletons and everything stays independently testable.
pub struct ClientCore {
    pub shifts: ShiftLifecycleController,
    pub documents: DocumentFetchVerifier,
}

impl ClientCore {
    pub fn new(
        cfg: &Config,
        remote: Arc<dyn RemoteData>,
        store: Arc<dyn ObjectStore>,
        services: Arc<dyn LocationServices>,
        worker_id: impl Into<String>,
    ) -> Self {
        Self {
            shifts: ShiftLifecycleController::new(
                remote,
                services,
                cfg.retry.clone(),
                Duration::from_millis(cfg.location_timeout_ms),
                worker_id,
            ),
            documents: DocumentFetchVerifier::new(
                store,
                cfg.cache_dir.clone(),
                cfg.retry.clone(),
                cfg.size_tolerance_percent,
            ),
        }
    }
}
