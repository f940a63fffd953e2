#![allow(dead_code)]
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use fieldclock::boundary::{
    AccessHandle, LocationServices, ObjectStore, RemoteData, TransferReport,
};
use fieldclock::core::retry::RetryOptions;
use fieldclock::core::ShiftLifecycleController;
use fieldclock::errors::{AppError, AppResult};
use fieldclock::models::geo::AccuracyHint;
use fieldclock::models::permission::{LocationPermissionState, PermissionStatus};
use fieldclock::models::shift::{ShiftMutation, ShiftRecord, ShiftStatus};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const WORKER: &str = "worker-7";

/// Create a unique cache directory path inside the system temp dir and
/// remove any leftover from a previous run
pub fn temp_cache(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_fieldclock_cache"));
    std::fs::remove_dir_all(&path).ok();
    path
}

pub fn booked_shift(schedule_id: &str, worker_id: &str) -> ShiftRecord {
    ShiftRecord {
        schedule_id: schedule_id.to_string(),
        worker_id: worker_id.to_string(),
        scheduled_start: Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap(),
        scheduled_end: Utc.with_ymd_and_hms(2025, 9, 1, 17, 0, 0).unwrap(),
        actual_start: None,
        actual_end: None,
        status: ShiftStatus::Booked,
        location_at_start: None,
        location_at_end: None,
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Remote schedule store fake
// ---------------------------------------------------------------------------

pub struct FakeRemote {
    pub shifts: Mutex<HashMap<String, ShiftRecord>>,
    pub fetch_calls: AtomicU32,
    pub submit_calls: AtomicU32,
    /// Fail this many submits with a network error before letting one through
    pub fail_submits: AtomicU32,
    /// When set, every submit is rejected as a permission error
    pub reject_all: bool,
}

impl FakeRemote {
    pub fn with_shift(record: ShiftRecord) -> Self {
        let mut shifts = HashMap::new();
        shifts.insert(record.schedule_id.clone(), record);
        Self {
            shifts: Mutex::new(shifts),
            fetch_calls: AtomicU32::new(0),
            submit_calls: AtomicU32::new(0),
            fail_submits: AtomicU32::new(0),
            reject_all: false,
        }
    }

    pub fn script_failures(self, n: u32) -> Self {
        self.fail_submits.store(n, Ordering::SeqCst);
        self
    }

    pub fn rejecting(mut self) -> Self {
        self.reject_all = true;
        self
    }

    pub async fn shift(&self, schedule_id: &str) -> ShiftRecord {
        self.shifts
            .lock()
            .await
            .get(schedule_id)
            .cloned()
            .expect("shift present")
    }
}

#[async_trait]
impl RemoteData for FakeRemote {
    async fn fetch_shift(&self, schedule_id: &str) -> AppResult<ShiftRecord> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.shifts
            .lock()
            .await
            .get(schedule_id)
            .cloned()
            .ok_or_else(|| AppError::Validation(format!("unknown schedule {schedule_id}")))
    }

    async fn submit_shift_mutation(&self, mutation: &ShiftMutation) -> AppResult<ShiftRecord> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_all {
            return Err(AppError::Permission("row-level security".into()));
        }
        if self
            .fail_submits
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AppError::Network("connection reset by peer".into()));
        }
        let mut shifts = self.shifts.lock().await;
        let record = shifts
            .get_mut(&mutation.schedule_id)
            .ok_or_else(|| AppError::Validation(format!("unknown schedule {}", mutation.schedule_id)))?;
        if record.worker_id != mutation.worker_id {
            return Err(AppError::Permission("shift belongs to another worker".into()));
        }
        // Idempotent set-to-target: a duplicate of an already applied
        // mutation changes nothing.
        match mutation.target {
            ShiftStatus::Started => {
                if record.status == ShiftStatus::Booked {
                    record.status = ShiftStatus::Started;
                    record.actual_start = Some(mutation.timestamp);
                    record.location_at_start = mutation.location;
                }
            }
            ShiftStatus::Completed => {
                if record.status == ShiftStatus::Started {
                    record.status = ShiftStatus::Completed;
                    record.actual_end = Some(mutation.timestamp);
                    record.location_at_end = mutation.location;
                    record.notes = mutation.notes.clone();
                }
            }
            ShiftStatus::Booked => {}
        }
        Ok(record.clone())
    }
}

// ---------------------------------------------------------------------------
// OS location layer fake
// ---------------------------------------------------------------------------

pub struct FakeLocation {
    pub supported: bool,
    pub services_enabled: bool,
    pub status: PermissionStatus,
    pub can_ask_again: bool,
    pub prompt_result: PermissionStatus,
    pub prompt_calls: AtomicU32,
    pub position: (f64, f64),
    pub position_delay_ms: u64,
    pub position_fails: bool,
}

impl Default for FakeLocation {
    fn default() -> Self {
        Self {
            supported: true,
            services_enabled: true,
            status: PermissionStatus::Granted,
            can_ask_again: true,
            prompt_result: PermissionStatus::Granted,
            prompt_calls: AtomicU32::new(0),
            position: (45.4642, 9.1900),
            position_delay_ms: 0,
            position_fails: false,
        }
    }
}

impl FakeLocation {
    pub fn granted() -> Self {
        Self::default()
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::default()
        }
    }

    pub fn services_off() -> Self {
        Self {
            services_enabled: false,
            ..Self::default()
        }
    }

    pub fn permanently_denied() -> Self {
        Self {
            status: PermissionStatus::Denied,
            can_ask_again: false,
            ..Self::default()
        }
    }

    pub fn denied_askable(prompt_result: PermissionStatus) -> Self {
        Self {
            status: PermissionStatus::Denied,
            can_ask_again: true,
            prompt_result,
            ..Self::default()
        }
    }

    pub fn undetermined(prompt_result: PermissionStatus) -> Self {
        Self {
            status: PermissionStatus::Undetermined,
            prompt_result,
            ..Self::default()
        }
    }

    pub fn at(position: (f64, f64)) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn slow(position_delay_ms: u64) -> Self {
        Self {
            position_delay_ms,
            ..Self::default()
        }
    }

    pub fn read_error() -> Self {
        Self {
            position_fails: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl LocationServices for FakeLocation {
    fn supported(&self) -> bool {
        self.supported
    }

    async fn services_enabled(&self) -> AppResult<bool> {
        Ok(self.services_enabled)
    }

    async fn permission_state(&self) -> AppResult<LocationPermissionState> {
        Ok(LocationPermissionState {
            status: self.status,
            can_ask_again: self.can_ask_again,
            services_enabled: self.services_enabled,
        })
    }

    async fn request_permission(&self) -> AppResult<PermissionStatus> {
        self.prompt_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.prompt_result)
    }

    async fn current_position(&self, _accuracy: AccuracyHint) -> AppResult<(f64, f64)> {
        if self.position_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.position_delay_ms)).await;
        }
        if self.position_fails {
            return Err(AppError::Other("position read failed".into()));
        }
        Ok(self.position)
    }
}

// ---------------------------------------------------------------------------
// Object storage fake
// ---------------------------------------------------------------------------

const STORE_URL_PREFIX: &str = "https://store.test/";

pub struct FakeStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    pub status: u16,
    pub handle_calls: AtomicU32,
    pub download_calls: AtomicU32,
}

impl FakeStore {
    pub fn new(status: u16) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            status,
            handle_calls: AtomicU32::new(0),
            download_calls: AtomicU32::new(0),
        }
    }

    pub async fn put(&self, key: &str, bytes: Vec<u8>) {
        self.objects.lock().await.insert(key.to_string(), bytes);
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn access_handle(&self, storage_key: &str) -> AppResult<AccessHandle> {
        self.handle_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AccessHandle {
            url: format!("{STORE_URL_PREFIX}{storage_key}"),
            expires_in_secs: 300,
        })
    }

    async fn download(&self, handle: &AccessHandle, dest: &Path) -> AppResult<TransferReport> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        let key = handle
            .url
            .strip_prefix(STORE_URL_PREFIX)
            .ok_or_else(|| AppError::Validation(format!("unexpected handle url {}", handle.url)))?;
        if !(200..300).contains(&self.status) {
            return Ok(TransferReport {
                status: self.status,
                bytes_written: 0,
            });
        }
        let bytes = self
            .objects
            .lock()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::Network(format!("object not found: {key}")))?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(TransferReport {
            status: self.status,
            bytes_written: bytes.len() as u64,
        })
    }
}

// ---------------------------------------------------------------------------
// Assembly helpers
// ---------------------------------------------------------------------------

pub fn fast_retry() -> RetryOptions {
    RetryOptions {
        max_retries: 2,
        initial_delay_ms: 1000,
        max_delay_ms: 4000,
    }
}

pub fn controller(
    remote: Arc<FakeRemote>,
    location: Arc<FakeLocation>,
    worker_id: &str,
) -> ShiftLifecycleController {
    ShiftLifecycleController::new(
        remote,
        location,
        fast_retry(),
        Duration::from_millis(500),
        worker_id,
    )
}
