//! Header, route, and column-layout decisions.
//!
//! These three decisions are made once per payload, from the tokenized first
//! line (candidate header) and the first non-blank data line, and then
//! applied to every data row.

use tunepick_core::Partition;

/// The five recognized column names, case-insensitive
const KNOWN_COLUMNS: [&str; 5] = ["status", "artist", "title", "year", "genre"];

/// The parsing strategy selected for a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Rows carry a leading partition discriminator
    StatusTagged,
    /// Rows are artist/title/year/genre only
    Plain,
}

impl Route {
    /// Short label used in logs and last-import metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::StatusTagged => "status",
            Route::Plain => "plain",
        }
    }
}

/// Resolved column indices. `None` means the column is absent; extraction
/// then yields an empty field rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub status: Option<usize>,
    pub artist: Option<usize>,
    pub title: Option<usize>,
    pub year: Option<usize>,
    pub genre: Option<usize>,
}

impl Columns {
    /// Positional defaults for a headerless status-tagged payload
    const STATUS_DEFAULT: Columns = Columns {
        status: Some(0),
        artist: Some(1),
        title: Some(2),
        year: Some(3),
        genre: Some(4),
    };

    /// Positional defaults for a headerless plain payload
    const PLAIN_DEFAULT: Columns = Columns {
        status: None,
        artist: Some(0),
        title: Some(1),
        year: Some(2),
        genre: Some(3),
    };

    /// Extract a field by resolved index, empty when absent
    pub fn field<'a>(fields: &'a [String], index: Option<usize>) -> &'a str {
        index.and_then(|i| fields.get(i)).map_or("", |s| s.as_str())
    }
}

/// The complete per-payload parsing decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub route: Route,
    pub has_header: bool,
    pub columns: Columns,
}

/// True if any token case-insensitively matches a known column name
pub fn has_known_header(tokens: &[String]) -> bool {
    tokens
        .iter()
        .any(|t| KNOWN_COLUMNS.contains(&t.to_lowercase().as_str()))
}

/// Decide header presence, route, and column layout.
///
/// - A header exists if any first-line token case-insensitively matches a
///   known column name.
/// - The route is status-tagged if the header declares a status column, or,
///   with no header, if the first token of the first data row
///   case-insensitively names a partition. Otherwise plain.
/// - With a header, columns resolve by name (first match wins); without
///   one, a fixed positional default applies per route.
pub fn detect_schema(header_tokens: &[String], first_data_tokens: &[String]) -> Schema {
    let lowered: Vec<String> = header_tokens.iter().map(|t| t.to_lowercase()).collect();
    let has_header = has_known_header(header_tokens);

    let position = |name: &str| lowered.iter().position(|t| t == name);

    let (route, columns) = if has_header {
        let status = position("status");
        let route = if status.is_some() {
            Route::StatusTagged
        } else {
            Route::Plain
        };
        let columns = Columns {
            status,
            artist: position("artist"),
            title: position("title"),
            year: position("year"),
            genre: position("genre"),
        };
        (route, columns)
    } else if first_data_tokens
        .first()
        .is_some_and(|t| Partition::looks_like_discriminator(t))
    {
        (Route::StatusTagged, Columns::STATUS_DEFAULT)
    } else {
        (Route::Plain, Columns::PLAIN_DEFAULT)
    };

    tracing::debug!(
        route = route.as_str(),
        has_header,
        "schema decided for payload"
    );

    Schema {
        route,
        has_header,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &[&str]) -> Vec<String> {
        s.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn header_with_status_routes_status_tagged() {
        let schema = detect_schema(
            &toks(&["Status", "Artist", "Title", "Year", "Genre"]),
            &toks(&["Current", "Sia", "Chandelier", "2014", "Pop"]),
        );
        assert_eq!(schema.route, Route::StatusTagged);
        assert!(schema.has_header);
        assert_eq!(schema.columns.status, Some(0));
        assert_eq!(schema.columns.genre, Some(4));
    }

    #[test]
    fn header_names_resolve_in_any_order() {
        let schema = detect_schema(
            &toks(&["Genre", "Title", "Artist"]),
            &toks(&["Pop", "Chandelier", "Sia"]),
        );
        assert_eq!(schema.route, Route::Plain);
        assert_eq!(schema.columns.artist, Some(2));
        assert_eq!(schema.columns.title, Some(1));
        assert_eq!(schema.columns.genre, Some(0));
        assert_eq!(schema.columns.year, None);
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let schema = detect_schema(&toks(&["ARTIST", "title"]), &toks(&["Sia", "Chandelier"]));
        assert!(schema.has_header);
        assert_eq!(schema.columns.artist, Some(0));
    }

    #[test]
    fn headerless_discriminator_first_token_routes_status_tagged() {
        let schema = detect_schema(
            &toks(&["current", "Sia", "Chandelier", "2014", "Pop"]),
            &toks(&["current", "Sia", "Chandelier", "2014", "Pop"]),
        );
        assert!(!schema.has_header);
        assert_eq!(schema.route, Route::StatusTagged);
        assert_eq!(schema.columns, Columns::STATUS_DEFAULT);
    }

    #[test]
    fn headerless_plain_gets_positional_defaults() {
        let schema = detect_schema(
            &toks(&["Sia", "Chandelier", "2014", "Pop"]),
            &toks(&["Sia", "Chandelier", "2014", "Pop"]),
        );
        assert!(!schema.has_header);
        assert_eq!(schema.route, Route::Plain);
        assert_eq!(schema.columns, Columns::PLAIN_DEFAULT);
    }

    #[test]
    fn missing_index_yields_empty_field() {
        let fields = toks(&["only", "two"]);
        assert_eq!(Columns::field(&fields, Some(5)), "");
        assert_eq!(Columns::field(&fields, None), "");
        assert_eq!(Columns::field(&fields, Some(1)), "two");
    }
}
