//! Domain types for Tunepick

mod genre;
mod ids;
mod library;
mod meta;
mod recent;
mod song;

pub use genre::Genre;
pub use ids::SongId;
pub use library::{Library, Partition};
pub use meta::LastImportMeta;
pub use recent::{RecentEntry, RecentList, RECENT_MAX};
pub use song::{IdentityKey, Song, YEAR_MAX, YEAR_MIN};
