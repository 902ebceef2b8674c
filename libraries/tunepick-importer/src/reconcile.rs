//! Reconciliation: raw delimited text plus a mode into new partition
//! contents and an outcome report.
//!
//! The computation is fully in-memory and synchronous; the caller sees
//! either the complete result or nothing, never a partially-updated state.
//! Persisting the result is the caller's business, performed only after
//! this function returns.

use crate::dedupe::{Admit, DuplicateTracker};
use crate::delimiter::{detect_delimiter, CUSTOM_DELIMITER};
use crate::normalize::extract_year;
use crate::report::{ImportReport, ReportBuilder};
use crate::schema::{self, Columns, Route, Schema};
use crate::tokenizer::{strip_control, tokenize};
use std::collections::HashSet;
use tunepick_core::{Genre, Library, Partition, Song, SongId};

/// Caller-selected reconciliation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Append validated, de-duplicated rows to current; archive untouched
    Merge,
    /// Wholesale substitution of both partitions. Destructive and
    /// irreversible from the engine's perspective; the caller must obtain
    /// explicit confirmation first.
    Replace,
}

/// Result of one reconciliation call
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// The new library contents
    pub library: Library,
    /// Which parsing route applied
    pub route: Route,
    /// Outcome counts and failed lines
    pub report: ImportReport,
}

/// Reconcile raw delimited text against an existing library snapshot.
///
/// A pure function of its inputs: nothing is read or written beyond them.
/// Row-level failures never abort the batch; a wholly blank payload
/// short-circuits to an empty report (merge keeps the snapshot as-is,
/// replace yields empty partitions, which is what replacing a library with
/// an empty document means).
pub fn reconcile(existing: &Library, text: &str, mode: ImportMode) -> Reconciled {
    // Exported-for-download payloads are BOM-prefixed.
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let lines: Vec<String> = text.split('\n').map(strip_control).collect();

    if lines.iter().all(|l| l.trim().is_empty()) {
        tracing::debug!("blank payload, nothing to reconcile");
        let library = match mode {
            ImportMode::Merge => existing.clone(),
            ImportMode::Replace => Library::default(),
        };
        return Reconciled {
            library,
            route: Route::Plain,
            report: ImportReport::default(),
        };
    }

    let delim = detect_delimiter(&lines[0], CUSTOM_DELIMITER);
    let header_tokens = tokenize(&lines[0], delim);

    // The first non-blank line after the candidate header feeds the route
    // decision for headerless payloads.
    let data_start = usize::from(schema::has_known_header(&header_tokens));
    let first_data_tokens = lines[data_start..]
        .iter()
        .find(|l| !l.trim().is_empty())
        .map(|l| tokenize(l, delim))
        .unwrap_or_default();

    let schema = schema::detect_schema(&header_tokens, &first_data_tokens);

    let mut tracker = match mode {
        ImportMode::Merge => DuplicateTracker::for_merge(existing),
        ImportMode::Replace => DuplicateTracker::for_replace(),
    };
    let mut builder = ReportBuilder::default();
    let mut current_rows: Vec<Song> = Vec::new();
    let mut archive_rows: Vec<Song> = Vec::new();

    for raw in &lines[data_start..] {
        if raw.trim().is_empty() {
            continue;
        }
        let fields = tokenize(raw, delim);
        let Some((partition, song)) = validate_row(&schema, &fields) else {
            builder.fail_line(raw);
            continue;
        };

        let scope = match schema.route {
            Route::StatusTagged => Some(partition),
            Route::Plain => None,
        };
        match tracker.admit(&song, scope) {
            Admit::Keep => match partition {
                Partition::Current => current_rows.push(song),
                Partition::Archive => archive_rows.push(song),
            },
            Admit::DupInFile | Admit::DupVsExisting => {}
        }
    }

    let (library, success_count) = match mode {
        ImportMode::Merge => {
            // Status-tagged rows merge into current regardless of tag;
            // archive is untouched by a merge.
            let added = current_rows.len() + archive_rows.len();
            let mut library = existing.clone();
            library.current.extend(current_rows);
            library.current.extend(archive_rows);
            (library, added)
        }
        ImportMode::Replace => {
            let stored = current_rows.len() + archive_rows.len();
            (Library::new(current_rows, archive_rows), stored)
        }
    };

    let mut library = library;
    assign_unique_ids(&mut library);

    let report = builder.finish(success_count, tracker.total());
    tracing::info!(
        route = schema.route.as_str(),
        success = report.success_count,
        duplicates = report.duplicates_total,
        failed = report.failed_count,
        "reconciliation complete"
    );

    Reconciled {
        library,
        route: schema.route,
        report,
    }
}

/// Extract, clean, and validate one tokenized row.
///
/// Returns `None` when the row fails: empty artist, empty title, a present
/// year outside the accepted range, or (status route) a discriminator that
/// is not exactly `Current` or `Archive`. Genre text never fails; it
/// normalizes to the nearest domain entry or `Other`.
fn validate_row(schema: &Schema, fields: &[String]) -> Option<(Partition, Song)> {
    let partition = match schema.route {
        Route::StatusTagged => {
            let token = Columns::field(fields, schema.columns.status);
            Partition::from_discriminator(token)?
        }
        Route::Plain => Partition::Current,
    };

    let artist = Columns::field(fields, schema.columns.artist);
    let title = Columns::field(fields, schema.columns.title);
    let year = extract_year(Columns::field(fields, schema.columns.year));
    let genre = Genre::normalize(Columns::field(fields, schema.columns.genre));

    let song = Song::new(artist, title, year, genre).ok()?;
    Some((partition, song))
}

/// Guarantee id uniqueness across both produced partitions.
///
/// An id already claimed elsewhere in the same pass is regenerated;
/// untouched ids are preserved.
fn assign_unique_ids(library: &mut Library) {
    let mut seen: HashSet<SongId> = HashSet::with_capacity(library.len());
    for song in library
        .current
        .iter_mut()
        .chain(library.archive.iter_mut())
    {
        while !seen.insert(song.id.clone()) {
            song.regenerate_id();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_unique_ids_regenerates_collisions() {
        let a = Song::new("A", "One", None, Genre::Pop).unwrap();
        let mut b = Song::new("B", "Two", None, Genre::Pop).unwrap();
        b.id = a.id.clone();
        let mut library = Library::new(vec![a.clone()], vec![b]);

        assign_unique_ids(&mut library);
        assert_eq!(library.current[0].id, a.id);
        assert_ne!(library.archive[0].id, a.id);
    }

    #[test]
    fn validate_row_rejects_bad_discriminator() {
        let schema = schema::detect_schema(
            &["Status", "Artist", "Title", "Year", "Genre"]
                .map(String::from)
                .to_vec(),
            &[],
        );
        let ok = ["Current", "Sia", "Chandelier", "2014", "Pop"]
            .map(String::from)
            .to_vec();
        assert!(validate_row(&schema, &ok).is_some());

        for bad in ["current", "Done", ""] {
            let row = [bad, "Sia", "Chandelier", "2014", "Pop"]
                .map(String::from)
                .to_vec();
            assert!(validate_row(&schema, &row).is_none(), "{bad:?} accepted");
        }
    }
}
