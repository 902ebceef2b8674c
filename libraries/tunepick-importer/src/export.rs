//! Library to delimited text — the same format the engine reads back.

use crate::delimiter::CUSTOM_DELIMITER;
use chrono::{DateTime, Local};
use tunepick_core::{Library, Partition, Song};

/// Export options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Prefix the text with a byte-order mark. Files handed to the user
    /// for download get one so spreadsheet tools detect UTF-8; text bound
    /// for programmatic sync storage does not.
    pub with_bom: bool,
}

impl ExportOptions {
    /// Options for a user-facing download
    pub fn for_download() -> Self {
        Self { with_bom: true }
    }

    /// Options for programmatic sync storage
    pub fn for_sync() -> Self {
        Self { with_bom: false }
    }
}

/// Serialize both partitions as status-tagged delimited text.
///
/// Header row `Status@Artist@Title@Year@Genre`, then Current rows, then
/// Archive rows, joined with `\n`. Fields containing a quote, the
/// delimiter, or a line break are double-quoted with `""` escaping.
pub fn export_library(library: &Library, opts: ExportOptions) -> String {
    let header = ["Status", "Artist", "Title", "Year", "Genre"]
        .join(&CUSTOM_DELIMITER.to_string());

    let mut out = String::new();
    if opts.with_bom {
        out.push('\u{FEFF}');
    }
    out.push_str(&header);

    let mut push_rows = |partition: Partition, songs: &[Song]| {
        for song in songs {
            out.push('\n');
            out.push_str(partition.as_str());
            out.push(CUSTOM_DELIMITER);
            out.push_str(&escape_field(&song.artist));
            out.push(CUSTOM_DELIMITER);
            out.push_str(&escape_field(&song.title));
            out.push(CUSTOM_DELIMITER);
            if let Some(y) = song.year {
                out.push_str(&y.to_string());
            }
            out.push(CUSTOM_DELIMITER);
            out.push_str(&escape_field(song.genre.as_str()));
        }
    };
    push_rows(Partition::Current, &library.current);
    push_rows(Partition::Archive, &library.archive);

    out
}

/// Quote a field when it contains a quote, the delimiter, or a line break
fn escape_field(value: &str) -> String {
    let needs_quotes = value.contains('"')
        || value.contains(CUSTOM_DELIMITER)
        || value.contains('\n')
        || value.contains('\r');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Timestamped export filename, e.g. `(songs 08-23-26) 14-05.csv`
pub fn timestamped_filename(now: DateTime<Local>) -> String {
    now.format("(songs %m-%d-%y) %H-%M.csv").to_string()
}
