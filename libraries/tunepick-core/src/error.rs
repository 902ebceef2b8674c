/// Core error types for Tunepick
use crate::types::SongId;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Tunepick
#[derive(Error, Debug)]
pub enum CoreError {
    /// A song failed domain validation (empty artist/title, year out of range)
    #[error("Invalid song: {0}")]
    InvalidSong(String),

    /// A song with the same artist and title already exists in the library
    #[error("Duplicate song: {0}")]
    Duplicate(String),

    /// Song not found in either partition
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// Storage-related errors surfaced through the `BlobStore` seam
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create an invalid-song error
    pub fn invalid_song(msg: impl Into<String>) -> Self {
        Self::InvalidSong(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
