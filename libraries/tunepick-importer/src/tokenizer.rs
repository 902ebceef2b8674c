//! Line tokenization.
//!
//! Splits one line into fields on a single-character delimiter, honoring
//! double-quote-enclosed fields that may contain the delimiter or an
//! embedded quote written as `""`. Fields containing literal line breaks
//! are not supported: line splitting happens before tokenization, so such
//! content corrupts the field boundary (accepted limitation).

/// Strip non-printable control characters, keeping horizontal tab.
///
/// Guards against corrupted-encoding artifacts. Also removes any `\r` left
/// over from CRLF line endings.
pub fn strip_control(line: &str) -> String {
    line.chars()
        .filter(|&c| !(c.is_control() && c != '\t') && c != '\u{007F}')
        .collect()
}

/// Split one line into trimmed fields on `delim`.
///
/// A `"` toggles quoting; inside quotes the delimiter is literal and `""`
/// produces a single quote. Each field is trimmed of surrounding whitespace
/// after unquoting. An unterminated quote simply runs to end of line.
pub fn tokenize(line: &str, delim: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    cur.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cur.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == delim {
            out.push(std::mem::take(&mut cur));
        } else {
            cur.push(ch);
        }
    }
    out.push(cur);

    out.into_iter().map(|f| f.trim().to_string()).collect()
}
