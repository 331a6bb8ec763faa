//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use roster_ingest::{CsvOptions, DuplicateHeaderPolicy};
use roster_map::{DEFAULT_SCAN_ROWS, HeaderLocator, HeaderPolicy};

/// Options for a single read request.
///
/// `Default` keeps the lenient behavior: first row with any synonym is the
/// header, keyed rows are normalized even when no schema fits, and repeated
/// CSV headers keep the rightmost value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Rows scanned for a header in grid input.
    pub header_scan_rows: usize,
    pub header_policy: HeaderPolicy,
    /// Fail keyed input when no schema has all its required fields.
    pub strict_records: bool,
    pub duplicate_headers: DuplicateHeaderPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            header_scan_rows: DEFAULT_SCAN_ROWS,
            header_policy: HeaderPolicy::default(),
            strict_records: false,
            duplicate_headers: DuplicateHeaderPolicy::default(),
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_header_scan_rows(mut self, rows: usize) -> Self {
        self.header_scan_rows = rows;
        self
    }

    #[must_use]
    pub fn with_header_policy(mut self, policy: HeaderPolicy) -> Self {
        self.header_policy = policy;
        self
    }

    #[must_use]
    pub fn with_strict_records(mut self, strict: bool) -> Self {
        self.strict_records = strict;
        self
    }

    #[must_use]
    pub fn with_duplicate_headers(mut self, policy: DuplicateHeaderPolicy) -> Self {
        self.duplicate_headers = policy;
        self
    }

    pub fn locator(&self) -> HeaderLocator {
        HeaderLocator::new(self.header_scan_rows, self.header_policy)
    }

    pub fn csv(&self) -> CsvOptions {
        CsvOptions::default().with_duplicate_headers(self.duplicate_headers)
    }
}
