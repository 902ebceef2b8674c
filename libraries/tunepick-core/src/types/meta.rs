/// Metadata about the most recent import, shown to the user on demand
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of the last completed import operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastImportMeta {
    /// Operation kind: "merge", "replace", or "pull"
    pub mode: String,

    /// Source name (file path or remote document location)
    pub source: String,

    /// Payload size in bytes
    pub size: usize,

    /// When the import completed
    pub imported_at: DateTime<Utc>,

    /// Which parsing route was taken ("status" or "plain")
    pub route: String,

    /// Records added (merge) or total records stored (replace/pull)
    pub success_count: usize,

    /// Duplicate rows skipped
    pub duplicates_total: usize,

    /// Rows that failed validation
    pub failed_count: usize,
}
