use serde::{Deserialize, Serialize};

/// One published library snapshot.
///
/// The body is the delimited export text without a byte order mark. The
/// version is the publisher's clock in epoch milliseconds; last writer
/// wins, there is no merge on the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncDocument {
    pub body: String,
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl SyncDocument {
    /// Snapshot a body at the current wall clock
    pub fn now(body: String) -> Self {
        Self {
            body,
            version: chrono::Utc::now().timestamp_millis(),
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }
}
