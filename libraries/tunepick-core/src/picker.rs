//! Random song selection.
//!
//! Picking a song retires it: the chosen record moves from the current
//! partition to the archive in the same call, so a song can be picked at
//! most once until it is restored.

use crate::types::{Genre, Library, Song};
use rand::Rng;

/// What the user asked the picker for.
///
/// `Random` is a selector, not a genre: it first chooses uniformly among
/// genres that currently have songs, then picks within that genre's pool.
/// It is never stored on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickChoice {
    /// Pick within one genre
    Genre(Genre),
    /// Pick a genre first, then a song
    Random,
}

/// Pick a song, moving it from current to archive.
///
/// Returns `None` when no song satisfies the choice (empty genre pool, or a
/// fully empty current partition for `Random`). The library is unchanged in
/// that case.
pub fn pick<R: Rng + ?Sized>(
    library: &mut Library,
    choice: PickChoice,
    rng: &mut R,
) -> Option<Song> {
    let genre = match choice {
        PickChoice::Genre(g) => g,
        PickChoice::Random => {
            let candidates: Vec<Genre> = Genre::ALL
                .iter()
                .copied()
                .filter(|&g| library.current.iter().any(|s| s.genre == g))
                .collect();
            if candidates.is_empty() {
                return None;
            }
            candidates[rng.gen_range(0..candidates.len())]
        }
    };

    let pool: Vec<usize> = library
        .current
        .iter()
        .enumerate()
        .filter(|(_, s)| s.genre == genre)
        .map(|(i, _)| i)
        .collect();
    if pool.is_empty() {
        return None;
    }

    let idx = pool[rng.gen_range(0..pool.len())];
    let song = library.current.remove(idx);
    library.archive.push(song.clone());
    Some(song)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn library_with(genres: &[Genre]) -> Library {
        let mut lib = Library::default();
        for (i, &g) in genres.iter().enumerate() {
            lib.add(Song::new(format!("Artist {i}"), format!("Song {i}"), None, g).unwrap())
                .unwrap();
        }
        lib
    }

    #[test]
    fn pick_moves_song_to_archive() {
        let mut lib = library_with(&[Genre::Pop, Genre::Pop, Genre::Country]);
        let mut rng = StdRng::seed_from_u64(7);

        let picked = pick(&mut lib, PickChoice::Genre(Genre::Pop), &mut rng).unwrap();
        assert_eq!(picked.genre, Genre::Pop);
        assert_eq!(lib.current.len(), 2);
        assert_eq!(lib.archive.len(), 1);
        assert_eq!(lib.archive[0].id, picked.id);
    }

    #[test]
    fn pick_from_empty_genre_returns_none() {
        let mut lib = library_with(&[Genre::Pop]);
        let mut rng = StdRng::seed_from_u64(7);

        assert!(pick(&mut lib, PickChoice::Genre(Genre::MetalHardRock), &mut rng).is_none());
        assert_eq!(lib.current.len(), 1);
        assert!(lib.archive.is_empty());
    }

    #[test]
    fn random_pick_only_considers_populated_genres() {
        let mut lib = library_with(&[Genre::Country]);
        let mut rng = StdRng::seed_from_u64(42);

        let picked = pick(&mut lib, PickChoice::Random, &mut rng).unwrap();
        assert_eq!(picked.genre, Genre::Country);
    }

    #[test]
    fn random_pick_on_empty_library_returns_none() {
        let mut lib = Library::default();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(pick(&mut lib, PickChoice::Random, &mut rng).is_none());
    }
}
