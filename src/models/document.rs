use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Remote document as described by the metadata store. `declared_size` may
/// be approximate or stale, so it is only ever used for a soft check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub storage_key: String,
    pub declared_size: Option<u64>,
    pub mime_type: String,
}

impl DocumentRecord {
    pub fn new(storage_key: &str, declared_size: Option<u64>, mime_type: &str) -> Self {
        Self {
            storage_key: storage_key.to_string(),
            declared_size,
            mime_type: mime_type.to_string(),
        }
    }
}

/// A verified local copy of a document. Only produced after the artifact was
/// confirmed present and non-empty, so holders may hand it to a viewer.
#[derive(Debug, Clone, Serialize)]
pub struct LocalCacheEntry {
    pub local_path: PathBuf,
    pub actual_size: u64,
    pub size_mismatch_warning: bool,
}
