//! Text normalization shared by the library and the import engine.

/// Normalize free text captured from the outside world.
///
/// Replacement characters left behind by a bad decode are dropped, the
/// single-quote family collapses to a typographic apostrophe, curly double
/// quotes become straight quotes, and non-breaking spaces become plain
/// spaces.
pub fn normalize_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\u{FFFD}' => {}
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => out.push('\u{2019}'),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{00A0}' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// Case-fold and trim a text field for identity comparison.
pub fn casefold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Lowercase and strip all whitespace, used for genre matching.
pub fn squash(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}
