/// Core traits for Tunepick
use crate::error::Result;
use async_trait::async_trait;

/// Persistent key-value collaborator.
///
/// Implementers store serialized partition and metadata blobs by key. The
/// reconciliation engine never touches this seam; the controlling caller
/// persists only after a reconciliation has fully completed in memory, so a
/// storage failure can never leave the in-memory library inconsistent.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a blob by key, `None` when the key has never been written.
    ///
    /// # Errors
    /// Returns an error if the underlying store fails.
    async fn get_blob(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Write a blob under a key, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the underlying store fails.
    async fn set_blob(&self, key: &str, value: &serde_json::Value) -> Result<()>;
}
