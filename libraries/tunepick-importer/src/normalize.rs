//! Field-level cleanup for imported rows.

/// Extract an optional release year from free text.
///
/// Zero-width and invisible characters are removed first, then the first
/// 4-digit run matching `19xx` or `20xx` on word boundaries is taken.
/// Text with no such run ("N/A", "unknown", "") yields `None`, which is an
/// absent year, not a failure.
pub(crate) fn extract_year(raw: &str) -> Option<u16> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}'))
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect();

    let chars: Vec<char> = cleaned.trim().chars().collect();
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';

    for i in 0..chars.len().saturating_sub(3) {
        let window = &chars[i..i + 4];
        if !window.iter().all(char::is_ascii_digit) {
            continue;
        }
        let century = (window[0], window[1]);
        if century != ('1', '9') && century != ('2', '0') {
            continue;
        }
        let bounded_left = i == 0 || !is_word(chars[i - 1]);
        let bounded_right = i + 4 == chars.len() || !is_word(chars[i + 4]);
        if bounded_left && bounded_right {
            return window.iter().collect::<String>().parse().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_year() {
        assert_eq!(extract_year("2014"), Some(2014));
        assert_eq!(extract_year("1900"), Some(1900));
    }

    #[test]
    fn year_embedded_in_text() {
        assert_eq!(extract_year("c. 1987"), Some(1987));
        assert_eq!(extract_year("released 2003 (remaster)"), Some(2003));
    }

    #[test]
    fn first_bounded_match_wins() {
        assert_eq!(extract_year("1999/2004"), Some(1999));
    }

    #[test]
    fn no_year_is_absent_not_an_error() {
        assert_eq!(extract_year("N/A"), None);
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("unknown"), None);
    }

    #[test]
    fn unbounded_digit_runs_do_not_match() {
        assert_eq!(extract_year("21987"), None);
        assert_eq!(extract_year("19876"), None);
        assert_eq!(extract_year("x1987y"), None);
    }

    #[test]
    fn wrong_century_does_not_match() {
        assert_eq!(extract_year("1850"), None);
        assert_eq!(extract_year("2150"), None);
    }

    #[test]
    fn invisible_characters_are_ignored() {
        assert_eq!(extract_year("\u{200B}2014\u{FEFF}"), Some(2014));
        assert_eq!(extract_year("\u{00A0}1987 "), Some(1987));
    }
}
