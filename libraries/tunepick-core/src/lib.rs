//! Tunepick Core
//!
//! Domain types, traits, and error handling for the Tunepick song picker.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Genre`, `Library`, `Partition`, `IdentityKey`
//! - **Core Traits**: `BlobStore` (persistent key-value collaborator)
//! - **Picker**: random per-genre selection that retires picked songs
//! - **Error Handling**: unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tunepick_core::{Genre, Library, Song};
//!
//! let mut library = Library::default();
//! let song = Song::new("Sia", "Chandelier", Some(2014), Genre::Pop).unwrap();
//! library.add(song).unwrap();
//! assert_eq!(library.current.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod picker;
pub mod text;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use picker::{pick, PickChoice};
pub use traits::BlobStore;
pub use types::{
    Genre, IdentityKey, LastImportMeta, Library, Partition, RecentEntry, RecentList, Song, SongId,
};
