/// Library partitions and direct manipulation operations
use crate::error::{CoreError, Result};
use crate::text::casefold;
use crate::types::{Genre, Song, SongId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two disjoint collections a song belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partition {
    /// Eligible for selection
    Current,
    /// Already selected or retired
    Archive,
}

impl Partition {
    /// Wire discriminator label, exact case
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Current => "Current",
            Partition::Archive => "Archive",
        }
    }

    /// Parse the exact discriminator token. Case matters: `current` is not
    /// a legal discriminator even though it routes a headerless file to the
    /// status-tagged parser.
    pub fn from_discriminator(token: &str) -> Option<Partition> {
        match token {
            "Current" => Some(Partition::Current),
            "Archive" => Some(Partition::Archive),
            _ => None,
        }
    }

    /// True if the token case-insensitively names a partition, used only
    /// for route sniffing on headerless payloads.
    pub fn looks_like_discriminator(token: &str) -> bool {
        matches!(token.trim().to_lowercase().as_str(), "current" | "archive")
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two disjoint, ordered song collections.
///
/// Invariant: `id` is unique across `current ∪ archive`, and a song belongs
/// to exactly one partition at a time. All mutation happens through these
/// methods or by wholesale partition replacement after a reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    /// Songs awaiting selection
    pub current: Vec<Song>,
    /// Songs already selected or retired
    pub archive: Vec<Song>,
}

impl Library {
    /// Create a library from existing partitions
    pub fn new(current: Vec<Song>, archive: Vec<Song>) -> Self {
        Self { current, archive }
    }

    /// Total number of songs across both partitions
    pub fn len(&self) -> usize {
        self.current.len() + self.archive.len()
    }

    /// True when both partitions are empty
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.archive.is_empty()
    }

    /// Iterate over both partitions, current first
    pub fn iter_all(&self) -> impl Iterator<Item = &Song> {
        self.current.iter().chain(self.archive.iter())
    }

    /// Add a song to the current partition.
    ///
    /// # Errors
    /// Returns `CoreError::Duplicate` if a song with the same artist and
    /// title (case-insensitive, trimmed) already exists in either partition.
    pub fn add(&mut self, song: Song) -> Result<()> {
        let artist = casefold(&song.artist);
        let title = casefold(&song.title);
        let exists = self
            .iter_all()
            .any(|s| casefold(&s.artist) == artist && casefold(&s.title) == title);
        if exists {
            return Err(CoreError::Duplicate(format!(
                "{} — {}",
                song.title, song.artist
            )));
        }
        self.current.push(song);
        Ok(())
    }

    /// Delete a song from whichever partition holds it. Returns the removed
    /// song, or `None` if the id is unknown.
    pub fn delete(&mut self, id: &SongId) -> Option<Song> {
        if let Some(idx) = self.current.iter().position(|s| &s.id == id) {
            return Some(self.current.remove(idx));
        }
        if let Some(idx) = self.archive.iter().position(|s| &s.id == id) {
            return Some(self.archive.remove(idx));
        }
        None
    }

    /// Move a song from current to archive.
    ///
    /// # Errors
    /// Returns `CoreError::SongNotFound` if the id is not in current.
    pub fn archive_song(&mut self, id: &SongId) -> Result<()> {
        let idx = self
            .current
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| CoreError::SongNotFound(id.clone()))?;
        let song = self.current.remove(idx);
        self.archive.push(song);
        Ok(())
    }

    /// Move a song from archive back to current.
    ///
    /// # Errors
    /// Returns `CoreError::SongNotFound` if the id is not in the archive.
    pub fn restore_song(&mut self, id: &SongId) -> Result<()> {
        let idx = self
            .archive
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| CoreError::SongNotFound(id.clone()))?;
        let song = self.archive.remove(idx);
        self.current.push(song);
        Ok(())
    }

    /// Move every current song into the archive. Returns how many moved.
    pub fn archive_all(&mut self) -> usize {
        let moved = self.current.len();
        self.archive.append(&mut self.current);
        moved
    }

    /// Move every archived song back to current. Returns how many moved.
    pub fn restore_all(&mut self) -> usize {
        let moved = self.archive.len();
        self.current.append(&mut self.archive);
        moved
    }

    /// Delete every archived song. Returns how many were removed.
    pub fn clear_archive(&mut self) -> usize {
        let removed = self.archive.len();
        self.archive.clear();
        removed
    }

    /// Restore every archived song matching artist and title
    /// (case-insensitive, trimmed). Returns how many moved. Used by the
    /// recent-picks list, which remembers songs by name rather than id.
    pub fn restore_matching(&mut self, artist: &str, title: &str) -> usize {
        let artist = casefold(artist);
        let title = casefold(title);
        let mut moved = 0;
        let mut i = 0;
        while i < self.archive.len() {
            if casefold(&self.archive[i].artist) == artist
                && casefold(&self.archive[i].title) == title
            {
                let song = self.archive.remove(i);
                self.current.push(song);
                moved += 1;
            } else {
                i += 1;
            }
        }
        moved
    }

    /// Per-genre song counts for one partition, in display order
    pub fn genre_counts(&self, partition: Partition) -> Vec<(Genre, usize)> {
        let list = match partition {
            Partition::Current => &self.current,
            Partition::Archive => &self.archive,
        };
        Genre::ALL
            .iter()
            .map(|&g| (g, list.iter().filter(|s| s.genre == g).count()))
            .collect()
    }
}
