//! Document fetch-and-verify pipeline.
//! Downloads a remote object into the scoped cache directory and inspects
//! the resulting artifact before declaring it usable. An empty artifact is
//! always a hard failure; a declared-size mismatch is only a warning.

use crate::boundary::{ObjectStore, TransferReport};
use crate::core::classify::is_transient_failure;
use crate::core::retry::{RetryEngine, RetryOptions};
use crate::errors::{AppError, AppResult};
use crate::models::document::{DocumentRecord, LocalCacheEntry};
use crate::utils::sanitize_key;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Absolute slack applied on top of the percentage tolerance, so tiny files
/// with approximate metadata do not warn constantly.
const SIZE_TOLERANCE_FLOOR_BYTES: u64 = 1024;

pub struct DocumentFetchVerifier {
    store: Arc<dyn ObjectStore>,
    cache_dir: PathBuf,
    retry: RetryEngine,
    size_tolerance_percent: u8,
}

impl DocumentFetchVerifier {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        cache_dir: PathBuf,
        retry: RetryOptions,
        size_tolerance_percent: u8,
    ) -> Self {
        Self {
            store,
            cache_dir,
            retry: RetryEngine::new(retry),
            size_tolerance_percent,
        }
    }

    /// Fetch `doc` into the cache and verify it. Returns a LocalCacheEntry
    /// only when the artifact exists locally with a non-zero size. Repeated
    /// calls for the same key overwrite; last writer wins, which is safe
    /// because every call re-verifies before use.
    pub async fn fetch_and_verify(&self, doc: &DocumentRecord) -> AppResult<LocalCacheEntry> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        let dest = self.cache_dir.join(sanitize_key(&doc.storage_key));

        let report = self
            .retry
            .execute(
                || self.transfer(&doc.storage_key, &dest),
                is_transient_failure,
            )
            .await?;
        debug!(
            key = %doc.storage_key,
            status = report.status,
            bytes_written = report.bytes_written,
            "transfer finished"
        );

        // Trust the local filesystem over whatever the transfer reported.
        let actual_size = tokio::fs::metadata(&dest).await?.len();
        if actual_size == 0 {
            return Err(AppError::EmptyArtifact(doc.storage_key.clone()));
        }

        let size_mismatch_warning = match doc.declared_size {
            Some(declared) => self.size_mismatch(declared, actual_size),
            None => false,
        };
        if size_mismatch_warning {
            warn!(
                key = %doc.storage_key,
                declared = doc.declared_size,
                actual = actual_size,
                "artifact size differs from declared size"
            );
        }

        Ok(LocalCacheEntry {
            local_path: dest,
            actual_size,
            size_mismatch_warning,
        })
    }

    /// One attempt: handle, download, status check. A non-success status is
    /// surfaced as an error so the retry engine can treat it as transient.
    async fn transfer(&self, storage_key: &str, dest: &Path) -> AppResult<TransferReport> {
        let handle = self.store.access_handle(storage_key).await?;
        let report = self.store.download(&handle, dest).await?;
        if !report.is_success() {
            return Err(AppError::TransferFailed {
                status: report.status,
            });
        }
        Ok(report)
    }

    fn size_mismatch(&self, declared: u64, actual: u64) -> bool {
        let tolerance = (declared / 100)
            .saturating_mul(u64::from(self.size_tolerance_percent))
            .max(SIZE_TOLERANCE_FLOOR_BYTES);
        declared.abs_diff(actual) > tolerance
    }
}
