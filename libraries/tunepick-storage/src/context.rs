use async_trait::async_trait;
use sqlx::SqlitePool;
use tunepick_core::{BlobStore, LastImportMeta, Library, RecentList, Song};

use crate::documents::{
    self, DOC_IMPORT_LAST_META, DOC_LIBRARY_ARCHIVE, DOC_LIBRARY_CURRENT, DOC_PICKER_RECENT,
};
use crate::error::{Result, StorageError};

/// Typed facade over the document table
pub struct LibraryStore {
    pool: SqlitePool,
}

impl LibraryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Load both partitions. Missing documents read as empty lists, so a
    /// fresh database is a valid empty library.
    pub async fn load_library(&self) -> Result<Library> {
        let current = self.load_songs(DOC_LIBRARY_CURRENT).await?;
        let archive = self.load_songs(DOC_LIBRARY_ARCHIVE).await?;
        Ok(Library::new(current, archive))
    }

    /// Persist both partitions, overwriting the stored state
    pub async fn save_library(&self, library: &Library) -> Result<()> {
        self.save_json(DOC_LIBRARY_CURRENT, &library.current).await?;
        self.save_json(DOC_LIBRARY_ARCHIVE, &library.archive).await?;
        tracing::debug!(
            current = library.current.len(),
            archive = library.archive.len(),
            "library saved"
        );
        Ok(())
    }

    pub async fn load_recent(&self) -> Result<RecentList> {
        match documents::get_document(&self.pool, DOC_PICKER_RECENT).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(RecentList::default()),
        }
    }

    pub async fn save_recent(&self, recent: &RecentList) -> Result<()> {
        self.save_json(DOC_PICKER_RECENT, recent).await
    }

    pub async fn load_last_import(&self) -> Result<Option<LastImportMeta>> {
        match documents::get_document(&self.pool, DOC_IMPORT_LAST_META).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    pub async fn save_last_import(&self, meta: &LastImportMeta) -> Result<()> {
        self.save_json(DOC_IMPORT_LAST_META, meta).await
    }

    async fn load_songs(&self, key: &str) -> Result<Vec<Song>> {
        match documents::get_document(&self.pool, key).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn save_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        documents::set_document(&self.pool, key, &value).await
    }
}

#[async_trait]
impl BlobStore for LibraryStore {
    async fn get_blob(&self, key: &str) -> tunepick_core::Result<Option<serde_json::Value>> {
        Ok(documents::get_document(&self.pool, key).await?)
    }

    async fn set_blob(&self, key: &str, value: &serde_json::Value) -> tunepick_core::Result<()> {
        Ok(documents::set_document(&self.pool, key, value).await?)
    }
}
