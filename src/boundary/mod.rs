//! External collaborator boundaries.
//! The core never talks to the network, object storage or the OS location
//! layer directly; it goes through these traits so every component can be
//! exercised against in-memory fakes.

use crate::errors::AppResult;
use crate::models::geo::AccuracyHint;
use crate::models::permission::{LocationPermissionState, PermissionStatus};
use crate::models::shift::{ShiftMutation, ShiftRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Time-boxed access to a remote object, typically a signed URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessHandle {
    pub url: String,
    pub expires_in_secs: u64,
}

/// What the transfer layer reports after moving bytes to local storage.
/// The verifier trusts the local stat over `bytes_written`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransferReport {
    pub status: u16,
    pub bytes_written: u64,
}

impl TransferReport {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Remote schedule/shift store. Writes are idempotent "set state" operations
/// scoped to the authenticated worker by backend row-level security.
#[async_trait]
pub trait RemoteData: Send + Sync {
    async fn fetch_shift(&self, schedule_id: &str) -> AppResult<ShiftRecord>;
    async fn submit_shift_mutation(&self, mutation: &ShiftMutation) -> AppResult<ShiftRecord>;
}

/// Remote object storage for supporting documents.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn access_handle(&self, storage_key: &str) -> AppResult<AccessHandle>;
    async fn download(&self, handle: &AccessHandle, dest: &Path) -> AppResult<TransferReport>;
}

/// OS location layer: availability, permission queries, a one-shot prompt
/// and a one-shot position read.
#[async_trait]
pub trait LocationServices: Send + Sync {
    /// Some platforms categorically lack positioning support.
    fn supported(&self) -> bool;
    async fn services_enabled(&self) -> AppResult<bool>;
    async fn permission_state(&self) -> AppResult<LocationPermissionState>;
    /// May show a native dialog; callers must invoke at most once per capture.
    async fn request_permission(&self) -> AppResult<PermissionStatus>;
    async fn current_position(&self, accuracy: AccuracyHint) -> AppResult<(f64, f64)>;
}
