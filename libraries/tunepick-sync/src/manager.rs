//! Push/pull orchestration between a local library and a document store.

use crate::error::Result;
use crate::store::DocumentStore;
use crate::types::SyncDocument;
use tracing::info;
use tunepick_core::Library;
use tunepick_importer::{export_library, reconcile, ExportOptions, ImportMode, Reconciled};

/// Ties a [`DocumentStore`] to the library export/reconcile cycle.
///
/// Push publishes a snapshot of the whole library; pull replaces the local
/// library with whatever the remote holds. Neither side merges, so the
/// caller gates pull behind the same confirmation as a replace import.
pub struct SyncManager<S> {
    store: S,
}

impl<S: DocumentStore> SyncManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Publish the library as a fresh document.
    ///
    /// The body is the sync-flavored export, no byte order mark.
    ///
    /// # Errors
    /// Returns an error if publishing fails; the remote document is then
    /// unchanged.
    pub async fn push(&self, library: &Library) -> Result<SyncDocument> {
        let body = export_library(library, ExportOptions::for_sync());
        let document = SyncDocument::now(body);
        self.store.publish(&document).await?;
        info!(
            version = document.version,
            songs = library.len(),
            "library pushed"
        );
        Ok(document)
    }

    /// Fetch the remote document and reconcile it as a replace import.
    ///
    /// Returns `Ok(None)` when nothing has been published yet; the local
    /// library is then left alone. The reconciliation itself is in-memory,
    /// so the caller decides whether to persist the outcome.
    ///
    /// # Errors
    /// Returns an error if the fetch fails.
    pub async fn pull(&self, existing: &Library) -> Result<Option<(SyncDocument, Reconciled)>> {
        let Some(document) = self.store.fetch().await? else {
            info!("no remote document, nothing to pull");
            return Ok(None);
        };

        let outcome = reconcile(existing, &document.body, ImportMode::Replace);
        info!(
            version = document.version,
            stored = outcome.report.success_count,
            failed = outcome.report.failed_count,
            "library pulled"
        );
        Ok(Some((document, outcome)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use tunepick_core::{Genre, Song};

    fn library() -> Library {
        Library::new(
            vec![Song::new("Sia", "Chandelier", Some(2014), Genre::Pop).unwrap()],
            vec![Song::new("Queen", "Bohemian Rhapsody", Some(1975), Genre::RockAlt).unwrap()],
        )
    }

    #[tokio::test]
    async fn pull_from_empty_store_is_none() {
        let manager = SyncManager::new(MemoryDocumentStore::default());
        let outcome = manager.pull(&library()).await.unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn push_then_pull_round_trips_partitions() {
        let manager = SyncManager::new(MemoryDocumentStore::default());
        let local = library();

        let document = manager.push(&local).await.unwrap();
        assert!(!document.body.starts_with('\u{FEFF}'));

        let (pulled, outcome) = manager.pull(&Library::default()).await.unwrap().unwrap();
        assert_eq!(pulled.version, document.version);
        assert_eq!(outcome.library.current.len(), 1);
        assert_eq!(outcome.library.archive.len(), 1);
        assert_eq!(outcome.library.current[0].artist, "Sia");
        assert_eq!(outcome.report.failed_count, 0);
    }

    #[tokio::test]
    async fn push_overwrites_previous_document() {
        let store = MemoryDocumentStore::default();
        let manager = SyncManager::new(store);

        manager.push(&library()).await.unwrap();
        manager.push(&Library::default()).await.unwrap();

        let (_, outcome) = manager.pull(&library()).await.unwrap().unwrap();
        assert!(outcome.library.is_empty());
    }
}
