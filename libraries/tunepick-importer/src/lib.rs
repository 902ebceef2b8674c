//! Tunepick Import/Reconciliation Engine
//!
//! Ingests delimited text of unknown delimiter and unknown header layout,
//! detects its structure, validates and normalizes each row, deduplicates
//! against the file and the existing library, assigns stable identities, and
//! reports outcomes. The engine is a pure synchronous function from
//! (existing library snapshot, raw text, mode) to (new library, report); it
//! owns no ambient state and never performs I/O.
//!
//! # Architecture
//!
//! - `delimiter`: field-separator detection from the header line
//! - `tokenizer`: one line into fields, honoring double-quote escaping
//! - `schema`: header presence, route, and column-index resolution
//! - `normalize`: year extraction and field cleanup
//! - `dedupe`: intra-file and vs-existing duplicate tracking
//! - `reconcile`: merge/replace orchestration and identity assignment
//! - `report`: outcome aggregation
//! - `export`: library to delimited text (the format this engine reads back)
//! - `decode`: payload bytes to text with a legacy single-byte fallback
//!
//! # Example
//!
//! ```rust
//! use tunepick_core::Library;
//! use tunepick_importer::{reconcile, ImportMode};
//!
//! let text = "Artist@Title@Year@Genre\nSia@Chandelier@2014@Pop";
//! let outcome = reconcile(&Library::default(), text, ImportMode::Merge);
//! assert_eq!(outcome.report.success_count, 1);
//! ```

#![forbid(unsafe_code)]

mod dedupe;
mod normalize;
mod report;

pub mod decode;
pub mod delimiter;
pub mod export;
pub mod reconcile;
pub mod schema;
pub mod tokenizer;

pub use decode::decode_payload;
pub use delimiter::{detect_delimiter, CUSTOM_DELIMITER};
pub use export::{export_library, timestamped_filename, ExportOptions};
pub use reconcile::{reconcile, ImportMode, Reconciled};
pub use report::ImportReport;
pub use schema::Route;
