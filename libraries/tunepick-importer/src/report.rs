//! Outcome aggregation for one reconciliation call.

use serde::{Deserialize, Serialize};

/// The sole channel through which a caller learns an import's outcome.
///
/// `failed_lines` holds the raw text of every row that failed validation,
/// verbatim and in file order; the engine does no presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Records that ended up stored
    pub success_count: usize,
    /// Intra-file plus vs-existing duplicate rows skipped
    pub duplicates_total: usize,
    /// Rows that failed validation
    pub failed_count: usize,
    /// Raw failed lines, in file order
    pub failed_lines: Vec<String>,
}

impl ImportReport {
    /// True when the payload produced nothing at all: no stored records, no
    /// duplicates, no failures.
    pub fn is_empty(&self) -> bool {
        self.success_count == 0 && self.duplicates_total == 0 && self.failed_count == 0
    }
}

/// Accumulates failed lines during a pass and stamps the final counts.
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    failed_lines: Vec<String>,
}

impl ReportBuilder {
    /// Record a row that failed validation. The batch continues.
    pub fn fail_line(&mut self, raw: &str) {
        self.failed_lines.push(raw.to_string());
    }

    pub fn finish(self, success_count: usize, duplicates_total: usize) -> ImportReport {
        ImportReport {
            success_count,
            duplicates_total,
            failed_count: self.failed_lines.len(),
            failed_lines: self.failed_lines,
        }
    }
}
