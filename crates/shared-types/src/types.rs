use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One PDF in the managed library directory.
///
/// The path is the identifier: renaming a file produces a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedFile {
    /// Base name including the `.pdf` extension
    pub name: String,
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    pub modified: DateTime<Utc>,
}

impl ManagedFile {
    /// Modification time as milliseconds since the Unix epoch
    pub fn modified_millis(&self) -> i64 {
        self.modified.timestamp_millis()
    }
}

/// A reusable signature image.
///
/// Serialized in camelCase so records written by earlier releases
/// (`createdAt`) keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSignature {
    pub id: String,
    pub name: String,
    /// Self-contained image, usually a `data:image/png;base64,...` URI
    pub data: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}
