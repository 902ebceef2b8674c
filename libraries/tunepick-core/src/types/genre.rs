/// Genre domain for Tunepick
use crate::text::squash;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A music genre
///
/// The domain is fixed and ordered. The picker's "Random" selector is not a
/// genre and never appears on a stored song; see
/// [`PickChoice`](crate::picker::PickChoice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "Pop")]
    Pop,
    #[serde(rename = "Country")]
    Country,
    #[serde(rename = "Rock/Alt")]
    RockAlt,
    #[serde(rename = "R&B/HipHop")]
    RnbHipHop,
    #[serde(rename = "Other")]
    Other,
    #[serde(rename = "Tv/Movie/Kids")]
    TvMovieKids,
    #[serde(rename = "Metal/Hard Rock")]
    MetalHardRock,
}

impl Genre {
    /// All genres in display order
    pub const ALL: [Genre; 7] = [
        Genre::Pop,
        Genre::Country,
        Genre::RockAlt,
        Genre::RnbHipHop,
        Genre::Other,
        Genre::TvMovieKids,
        Genre::MetalHardRock,
    ];

    /// Canonical display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Country => "Country",
            Genre::RockAlt => "Rock/Alt",
            Genre::RnbHipHop => "R&B/HipHop",
            Genre::Other => "Other",
            Genre::TvMovieKids => "Tv/Movie/Kids",
            Genre::MetalHardRock => "Metal/Hard Rock",
        }
    }

    /// Exact-label lookup, case-sensitive
    pub fn from_label(label: &str) -> Option<Genre> {
        Genre::ALL.iter().copied().find(|g| g.as_str() == label)
    }

    /// Map arbitrary genre text to the nearest domain entry.
    ///
    /// Matching is case- and whitespace-insensitive substring matching;
    /// anything unrecognized lands in `Other`. Genre text is never a
    /// validation failure on its own.
    pub fn normalize(raw: &str) -> Genre {
        let trimmed = raw.trim();
        if let Some(g) = Genre::from_label(trimmed) {
            return g;
        }

        let k = squash(trimmed);
        if k.contains("pop") {
            Genre::Pop
        } else if k.contains("country") {
            Genre::Country
        } else if k.contains("rock") || k.contains("alt") {
            Genre::RockAlt
        } else if k.contains("r&b") || k.contains("hiphop") || k.contains("hip-hop") {
            Genre::RnbHipHop
        } else if k.contains("tv") || k.contains("movie") || k.contains("kids") {
            Genre::TvMovieKids
        } else if k.contains("metal") {
            Genre::MetalHardRock
        } else {
            Genre::Other
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_labels_round_trip() {
        for g in Genre::ALL {
            assert_eq!(Genre::from_label(g.as_str()), Some(g));
            assert_eq!(Genre::normalize(g.as_str()), g);
        }
    }

    #[test]
    fn normalize_is_substring_based() {
        assert_eq!(Genre::normalize("alt-rock"), Genre::RockAlt);
        assert_eq!(Genre::normalize("Hip Hop"), Genre::RnbHipHop);
        assert_eq!(Genre::normalize("hip-hop"), Genre::RnbHipHop);
        assert_eq!(Genre::normalize("COUNTRY "), Genre::Country);
        assert_eq!(Genre::normalize("Kids show"), Genre::TvMovieKids);
        assert_eq!(Genre::normalize("nu metal"), Genre::MetalHardRock);
    }

    #[test]
    fn unrecognized_defaults_to_other() {
        assert_eq!(Genre::normalize("xyz"), Genre::Other);
        assert_eq!(Genre::normalize(""), Genre::Other);
    }

    #[test]
    fn metal_beats_nothing_but_pop_wins_first() {
        // Matching order follows the display order: "pop" is checked before
        // "rock", so "pop rock" resolves to Pop.
        assert_eq!(Genre::normalize("pop rock"), Genre::Pop);
    }

    #[test]
    fn serde_uses_display_labels() {
        let json = serde_json::to_string(&Genre::RnbHipHop).unwrap();
        assert_eq!(json, "\"R&B/HipHop\"");
        let back: Genre = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Genre::RnbHipHop);
    }
}
