/// Recently picked songs, most recent first
use crate::types::{Genre, Song};
use serde::{Deserialize, Serialize};

/// Maximum number of remembered picks
pub const RECENT_MAX: usize = 4;

/// One remembered pick. Songs are remembered by name, not id, so the entry
/// stays meaningful after a replace import regenerates identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    pub artist: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    pub genre: Genre,
}

impl From<&Song> for RecentEntry {
    fn from(song: &Song) -> Self {
        Self {
            artist: song.artist.clone(),
            title: song.title.clone(),
            year: song.year,
            genre: song.genre,
        }
    }
}

/// Bounded most-recent-first list of picks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentList(Vec<RecentEntry>);

impl RecentList {
    /// Record a pick, evicting the oldest entry past [`RECENT_MAX`]
    pub fn push(&mut self, song: &Song) {
        self.0.insert(0, RecentEntry::from(song));
        self.0.truncate(RECENT_MAX);
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[RecentEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_most_recent_first_and_bounded() {
        let mut recent = RecentList::default();
        for i in 0..6 {
            let song = Song::new(format!("Artist {i}"), "Song", None, Genre::Pop).unwrap();
            recent.push(&song);
        }
        assert_eq!(recent.len(), RECENT_MAX);
        assert_eq!(recent.entries()[0].artist, "Artist 5");
        assert_eq!(recent.entries()[RECENT_MAX - 1].artist, "Artist 2");
    }
}
