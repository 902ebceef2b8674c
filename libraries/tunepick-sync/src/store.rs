//! Document store implementations.

use crate::error::{Result, SyncError};
use crate::types::SyncDocument;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Remote home of the published library document.
///
/// One document per endpoint; fetch returns the whole thing or nothing.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the current document, `None` when nothing has been published.
    ///
    /// # Errors
    /// Returns an error if the store cannot be reached or answers badly.
    async fn fetch(&self) -> Result<Option<SyncDocument>>;

    /// Publish a document, replacing whatever is there.
    ///
    /// # Errors
    /// Returns an error if the store cannot be reached or rejects the write.
    async fn publish(&self, document: &SyncDocument) -> Result<()>;
}

/// Document store backed by a single HTTP endpoint: GET fetches the JSON
/// document, PUT replaces it. A 404 on fetch means nothing published yet.
pub struct HttpDocumentStore {
    http: Client,
    url: String,
}

impl HttpDocumentStore {
    /// Create a store for the given endpoint URL.
    pub fn new(url: &str) -> Result<Self> {
        let url = url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SyncError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Tunepick/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SyncError::Request)?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn fetch(&self) -> Result<Option<SyncDocument>> {
        debug!(url = %self.url, "fetching remote document");

        let response = self.http.get(&self.url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                SyncError::ServerUnreachable(e.to_string())
            } else {
                SyncError::Request(e)
            }
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let document = response.json::<SyncDocument>().await.map_err(|e| {
                    SyncError::ParseError(format!("bad document payload: {e}"))
                })?;
                Ok(Some(document))
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(SyncError::ServerError {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn publish(&self, document: &SyncDocument) -> Result<()> {
        debug!(url = %self.url, version = document.version, "publishing document");

        let response = self
            .http
            .put(&self.url)
            .json(document)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    SyncError::ServerUnreachable(e.to_string())
                } else {
                    SyncError::Request(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SyncError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// In-memory document store, for tests and offline experimentation.
#[derive(Default)]
pub struct MemoryDocumentStore {
    slot: RwLock<Option<SyncDocument>>,
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn fetch(&self) -> Result<Option<SyncDocument>> {
        Ok(self.slot.read().await.clone())
    }

    async fn publish(&self, document: &SyncDocument) -> Result<()> {
        *self.slot.write().await = Some(document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_store_rejects_non_http_urls() {
        assert!(HttpDocumentStore::new("ftp://example.com/doc").is_err());
        assert!(HttpDocumentStore::new("").is_err());
    }

    #[test]
    fn http_store_normalizes_trailing_slash() {
        let store = HttpDocumentStore::new("https://example.com/doc/").unwrap();
        assert_eq!(store.url(), "https://example.com/doc");
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryDocumentStore::default();
        assert_eq!(store.fetch().await.unwrap(), None);

        let doc = SyncDocument::now("Sia@Chandelier@2014@Pop".into());
        store.publish(&doc).await.unwrap();
        assert_eq!(store.fetch().await.unwrap(), Some(doc));
    }
}
