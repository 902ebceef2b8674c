/// Song domain type
use crate::error::{CoreError, Result};
use crate::text::{casefold, normalize_text};
use crate::types::{Genre, SongId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted release year
pub const YEAR_MIN: u16 = 1900;
/// Highest accepted release year
pub const YEAR_MAX: u16 = 2100;

/// A song in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Artist name (non-empty, normalized)
    pub artist: String,

    /// Song title (non-empty, normalized)
    pub title: String,

    /// Release year, when known
    #[serde(default)]
    pub year: Option<u16>,

    /// Genre (always a domain member)
    pub genre: Genre,
}

impl Song {
    /// Create a song with a freshly generated id.
    ///
    /// Artist and title are normalized and trimmed; construction fails if
    /// either is empty afterwards, or if a present year falls outside
    /// [`YEAR_MIN`, `YEAR_MAX`]. No invalid `Song` instance can exist.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidSong` on any violated field constraint.
    pub fn new(
        artist: impl AsRef<str>,
        title: impl AsRef<str>,
        year: Option<u16>,
        genre: Genre,
    ) -> Result<Self> {
        Self::with_id(SongId::generate(), artist, title, year, genre)
    }

    /// Create a song with a caller-supplied id (e.g. loaded from storage).
    ///
    /// # Errors
    /// Same field constraints as [`Song::new`].
    pub fn with_id(
        id: SongId,
        artist: impl AsRef<str>,
        title: impl AsRef<str>,
        year: Option<u16>,
        genre: Genre,
    ) -> Result<Self> {
        let artist = normalize_text(artist.as_ref()).trim().to_string();
        let title = normalize_text(title.as_ref()).trim().to_string();

        if artist.is_empty() {
            return Err(CoreError::invalid_song("artist is required"));
        }
        if title.is_empty() {
            return Err(CoreError::invalid_song("title is required"));
        }
        if let Some(y) = year {
            if !(YEAR_MIN..=YEAR_MAX).contains(&y) {
                return Err(CoreError::invalid_song(format!(
                    "year {y} outside {YEAR_MIN}-{YEAR_MAX}"
                )));
            }
        }

        Ok(Self {
            id,
            artist,
            title,
            year,
            genre,
        })
    }

    /// Identity key of this song, used for duplicate detection
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::of(&self.artist, &self.title, self.year, self.genre)
    }

    /// Replace this song's id with a freshly generated one
    pub fn regenerate_id(&mut self) {
        self.id = SongId::generate();
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.title, self.artist)?;
        if let Some(y) = self.year {
            write!(f, " ({y})")?;
        }
        write!(f, " [{}]", self.genre)
    }
}

/// Normalized (artist, title, year-or-absent, genre) tuple.
///
/// Text fields are case-folded and trimmed, so key equality is invariant
/// under case and surrounding-whitespace differences. The key is only ever
/// used for duplicate detection, never as a storage identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    artist: String,
    title: String,
    year: Option<u16>,
    genre: Genre,
}

impl IdentityKey {
    /// Build a key from raw field values
    pub fn of(artist: &str, title: &str, year: Option<u16>, genre: Genre) -> Self {
        Self {
            artist: casefold(artist),
            title: casefold(title),
            year,
            genre,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_creation_trims_and_keeps_fields() {
        let song = Song::new("  Sia ", "Chandelier", Some(2014), Genre::Pop).unwrap();
        assert_eq!(song.artist, "Sia");
        assert_eq!(song.title, "Chandelier");
        assert_eq!(song.year, Some(2014));
        assert_eq!(song.genre, Genre::Pop);
    }

    #[test]
    fn empty_artist_or_title_is_rejected() {
        assert!(Song::new("", "Chandelier", None, Genre::Pop).is_err());
        assert!(Song::new("Sia", "   ", None, Genre::Pop).is_err());
    }

    #[test]
    fn year_out_of_range_is_rejected() {
        assert!(Song::new("Sia", "Chandelier", Some(1899), Genre::Pop).is_err());
        assert!(Song::new("Sia", "Chandelier", Some(2101), Genre::Pop).is_err());
        assert!(Song::new("Sia", "Chandelier", Some(1900), Genre::Pop).is_ok());
        assert!(Song::new("Sia", "Chandelier", Some(2100), Genre::Pop).is_ok());
    }

    #[test]
    fn identity_key_ignores_case_and_whitespace() {
        let a = IdentityKey::of(" Sia ", "Chandelier", Some(2014), Genre::Pop);
        let b = IdentityKey::of("sia", " CHANDELIER ", Some(2014), Genre::Pop);
        assert_eq!(a, b);
    }

    #[test]
    fn identity_key_distinguishes_year_and_genre() {
        let base = IdentityKey::of("Sia", "Chandelier", Some(2014), Genre::Pop);
        assert_ne!(base, IdentityKey::of("Sia", "Chandelier", None, Genre::Pop));
        assert_ne!(
            base,
            IdentityKey::of("Sia", "Chandelier", Some(2014), Genre::Other)
        );
    }

    #[test]
    fn display_includes_year_when_present() {
        let song = Song::new("Sia", "Chandelier", Some(2014), Genre::Pop).unwrap();
        assert_eq!(song.to_string(), "Chandelier — Sia (2014) [Pop]");
    }
}
