//! Tunepick Sync
//!
//! Remote sync for the song library. The whole library travels as one
//! delimited-text document: push publishes a snapshot, pull replaces the
//! local library with the remote one. Last writer wins.

mod error;
mod manager;
mod store;
mod types;

// Public exports
pub use error::{Result, SyncError};
pub use manager::SyncManager;
pub use store::{DocumentStore, HttpDocumentStore, MemoryDocumentStore};
pub use types::SyncDocument;
