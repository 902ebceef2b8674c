//! Field-separator detection.
//!
//! The application's own export uses a custom `@` separator; spreadsheet
//! exports use commas. Rather than asking the user which format a file is,
//! the separator is picked from the header line alone.

/// The application's custom field separator
pub const CUSTOM_DELIMITER: char = '@';

/// Pick the field separator from the first line of the payload.
///
/// Counts commas and the custom separator in that line only; whichever has
/// strictly more occurrences wins. When neither occurs, the caller-supplied
/// default is returned.
pub fn detect_delimiter(first_line: &str, default: char) -> char {
    let commas = first_line.chars().filter(|&c| c == ',').count();
    let customs = first_line.chars().filter(|&c| c == CUSTOM_DELIMITER).count();

    if commas > customs {
        ','
    } else if customs > 0 {
        CUSTOM_DELIMITER
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_majority_wins() {
        assert_eq!(detect_delimiter("Artist,Title,Year,Genre", '@'), ',');
        // One stray @ inside a field does not flip the decision.
        assert_eq!(detect_delimiter("a@b,Title,Year,Genre", '@'), ',');
    }

    #[test]
    fn custom_wins_on_tie_or_majority() {
        assert_eq!(detect_delimiter("Artist@Title@Year@Genre", ','), '@');
        // Tie goes to the custom separator when it occurs at all.
        assert_eq!(detect_delimiter("a@b,c", ','), '@');
    }

    #[test]
    fn neither_present_falls_back_to_default() {
        assert_eq!(detect_delimiter("just one column", '@'), '@');
        assert_eq!(detect_delimiter("", ','), ',');
    }
}
