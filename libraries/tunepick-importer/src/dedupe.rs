//! Duplicate tracking, scoped to a single reconciliation call.

use std::collections::HashSet;
use tunepick_core::{IdentityKey, Library, Partition, Song};

/// Identity key scoped by route. On the status route the discriminator is
/// part of the key, so the same song tagged once Current and once Archive
/// is not a duplicate of itself, while two Current rows for it are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScopedKey {
    partition: Option<Partition>,
    key: IdentityKey,
}

/// Outcome of offering one validated row to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admit {
    /// First occurrence, keep the row
    Keep,
    /// Key already appeared earlier in the same file
    DupInFile,
    /// Key already exists in the pre-import library
    DupVsExisting,
}

/// Tracks identity keys seen during one reconciliation call.
pub(crate) struct DuplicateTracker {
    seen: HashSet<ScopedKey>,
    /// Plain keys of the pre-import library, both partitions. `None` in
    /// replace mode, where nothing pre-exists to merge against. The archive
    /// participates so that merge-importing the library's own export adds
    /// nothing back.
    existing: Option<HashSet<IdentityKey>>,
    /// Plain keys of rows accepted earlier in this batch, maintained only
    /// in merge mode. Status-tagged rows all merge into the current
    /// partition, so two rows that differ only by discriminator must still
    /// collapse to one.
    accepted: HashSet<IdentityKey>,
    pub duplicates_in_file: usize,
    pub duplicates_vs_existing: usize,
}

impl DuplicateTracker {
    /// Tracker for merge mode: rows are also compared against the existing
    /// library by plain identity key.
    pub fn for_merge(existing: &Library) -> Self {
        Self {
            seen: HashSet::new(),
            existing: Some(existing.iter_all().map(Song::identity_key).collect()),
            accepted: HashSet::new(),
            duplicates_in_file: 0,
            duplicates_vs_existing: 0,
        }
    }

    /// Tracker for replace mode: intra-file duplicates only.
    pub fn for_replace() -> Self {
        Self {
            seen: HashSet::new(),
            existing: None,
            accepted: HashSet::new(),
            duplicates_in_file: 0,
            duplicates_vs_existing: 0,
        }
    }

    /// Offer a validated row; first occurrence wins.
    ///
    /// `scope` carries the row's partition on the status route and `None`
    /// on the plain route.
    pub fn admit(&mut self, song: &Song, scope: Option<Partition>) -> Admit {
        let key = song.identity_key();
        let scoped = ScopedKey {
            partition: scope,
            key: key.clone(),
        };
        if !self.seen.insert(scoped) {
            self.duplicates_in_file += 1;
            return Admit::DupInFile;
        }

        if let Some(existing) = &self.existing {
            if existing.contains(&key) {
                self.duplicates_vs_existing += 1;
                return Admit::DupVsExisting;
            }
            if !self.accepted.insert(key) {
                self.duplicates_in_file += 1;
                return Admit::DupInFile;
            }
        }
        Admit::Keep
    }

    /// Sum of intra-file and vs-existing duplicate counts
    pub fn total(&self) -> usize {
        self.duplicates_in_file + self.duplicates_vs_existing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunepick_core::Genre;

    fn song(artist: &str, title: &str) -> Song {
        Song::new(artist, title, Some(2000), Genre::Pop).unwrap()
    }

    #[test]
    fn intra_file_repeat_first_wins() {
        let mut tracker = DuplicateTracker::for_merge(&Library::default());
        let a = song("Sia", "Chandelier");
        assert_eq!(tracker.admit(&a, None), Admit::Keep);
        assert_eq!(tracker.admit(&a, None), Admit::DupInFile);
        assert_eq!(tracker.duplicates_in_file, 1);
        assert_eq!(tracker.total(), 1);
    }

    #[test]
    fn key_normalization_catches_case_variants() {
        let mut tracker = DuplicateTracker::for_merge(&Library::default());
        assert_eq!(tracker.admit(&song("Sia", "Chandelier"), None), Admit::Keep);
        assert_eq!(
            tracker.admit(&song("SIA", " chandelier "), None),
            Admit::DupInFile
        );
    }

    #[test]
    fn existing_library_rows_count_separately() {
        let existing = Library::new(vec![song("Sia", "Chandelier")], vec![]);
        let mut tracker = DuplicateTracker::for_merge(&existing);
        assert_eq!(
            tracker.admit(&song("Sia", "Chandelier"), None),
            Admit::DupVsExisting
        );
        assert_eq!(tracker.duplicates_vs_existing, 1);
        assert_eq!(tracker.duplicates_in_file, 0);
    }

    #[test]
    fn archived_songs_also_count_as_existing() {
        let existing = Library::new(vec![], vec![song("Queen", "Bohemian Rhapsody")]);
        let mut tracker = DuplicateTracker::for_merge(&existing);
        assert_eq!(
            tracker.admit(&song("Queen", "Bohemian Rhapsody"), None),
            Admit::DupVsExisting
        );
    }

    #[test]
    fn status_scope_allows_current_and_archive_pair_in_replace() {
        let mut tracker = DuplicateTracker::for_replace();
        let a = song("Sia", "Chandelier");
        assert_eq!(tracker.admit(&a, Some(Partition::Current)), Admit::Keep);
        assert_eq!(tracker.admit(&a, Some(Partition::Archive)), Admit::Keep);
        assert_eq!(tracker.admit(&a, Some(Partition::Current)), Admit::DupInFile);
        assert_eq!(tracker.total(), 1);
    }

    #[test]
    fn merge_collapses_status_pair_into_one() {
        let mut tracker = DuplicateTracker::for_merge(&Library::default());
        let a = song("Sia", "Chandelier");
        assert_eq!(tracker.admit(&a, Some(Partition::Current)), Admit::Keep);
        // Different scope, same plain key: both would land in current, so
        // the second is an intra-file duplicate.
        assert_eq!(tracker.admit(&a, Some(Partition::Archive)), Admit::DupInFile);
    }

    #[test]
    fn replace_ignores_existing_library() {
        let mut tracker = DuplicateTracker::for_replace();
        assert_eq!(tracker.admit(&song("Sia", "Chandelier"), None), Admit::Keep);
        assert_eq!(tracker.duplicates_vs_existing, 0);
    }
}
