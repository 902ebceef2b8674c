//! Payload bytes to text.
//!
//! Payloads are UTF-8, but legacy exports edited in old spreadsheet tools
//! show up as windows-1252 often enough to matter. The primary decode is
//! attempted first; when it shows two or more replacement characters and
//! the fallback decode shows fewer, the fallback wins.

/// Replacement-character count at which a decode looks corrupt
const CORRUPT_THRESHOLD: usize = 2;

/// Decode payload bytes, preferring UTF-8 with a windows-1252 fallback.
pub fn decode_payload(bytes: &[u8]) -> String {
    let utf8 = String::from_utf8_lossy(bytes).into_owned();
    let utf8_bad = count_replacements(&utf8);
    if utf8_bad < CORRUPT_THRESHOLD {
        return utf8;
    }

    let (fallback, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    if count_replacements(&fallback) < utf8_bad {
        tracing::debug!("payload decoded as windows-1252");
        fallback.into_owned()
    } else {
        utf8
    }
}

fn count_replacements(s: &str) -> usize {
    s.chars().filter(|&c| c == '\u{FFFD}').count()
}
